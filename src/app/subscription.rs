// SPDX-License-Identifier: MPL-2.0
//! Event loop of the terminal front-end.
//!
//! Input lines and loader events are merged into one ordered stream of
//! [`Message`]s, so the [`App`] only ever handles one event at a time.

use super::message::{Message, Output};
use super::view;
use super::App;
use crate::error::Result;
use crate::i18n::fluent::I18n;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

/// Where the next message came from.
#[derive(Debug)]
enum Source {
    Input(Option<String>),
    Loader(Message),
}

/// Runs the session until `quit` or end of input.
///
/// `initial` is loaded before the first line is read.
///
/// # Errors
///
/// Returns [`crate::error::Error::Io`] if reading input or writing output fails.
pub async fn run_session<R, W>(
    app: &mut App,
    i18n: &I18n,
    input: R,
    output: &mut W,
    initial: Option<String>,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = input.lines();

    write_lines(output, &view::welcome_lines(i18n)).await?;
    if let Some(category) = initial {
        let outputs = app.update(Message::LoadCategory(category)).await;
        if emit(output, i18n, &outputs).await? {
            return Ok(());
        }
    }

    loop {
        let source = tokio::select! {
            line = lines.next_line() => Source::Input(line?),
            event = app.next_loader_event() => Source::Loader(Message::Loader(event)),
        };

        let message = match source {
            Source::Input(None) => {
                log::debug!("End of input");
                app.update(Message::Quit).await;
                return Ok(());
            }
            Source::Input(Some(line)) => match Message::parse_command(&line) {
                Some(message) => message,
                None => continue,
            },
            Source::Loader(message) => message,
        };

        let outputs = app.update(message).await;
        if emit(output, i18n, &outputs).await? {
            return Ok(());
        }
    }
}

/// Renders `outputs`; returns whether the session should end.
async fn emit<W>(output: &mut W, i18n: &I18n, outputs: &[Output]) -> Result<bool>
where
    W: AsyncWrite + Unpin,
{
    for item in outputs {
        write_lines(output, &view::render(i18n, item)).await?;
    }
    Ok(outputs.contains(&Output::Quit))
}

async fn write_lines<W>(output: &mut W, lines: &[String]) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    for line in lines {
        output.write_all(line.as_bytes()).await?;
        output.write_all(b"\n").await?;
    }
    output.flush().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, Settings};
    use crate::test_utils::{file, image_info, FakeCommons};
    use std::sync::Arc;

    fn english() -> I18n {
        I18n::new(Some("en-US".to_string()), &Config::default())
    }

    fn app() -> App {
        let api = FakeCommons::new()
            .with_category("Trains", vec![vec![file("A.jpg"), file("B.jpg")]])
            .with_file("A.jpg", image_info(1, "A.jpg"))
            .with_file("B.jpg", image_info(2, "B.jpg"));
        App::new(Arc::new(api), Settings::default())
    }

    async fn session(script: &str, initial: Option<&str>) -> String {
        let mut app = app();
        let mut out = Vec::new();
        run_session(
            &mut app,
            &english(),
            script.as_bytes(),
            &mut out,
            initial.map(str::to_string),
        )
        .await
        .unwrap();
        String::from_utf8(out).unwrap()
    }

    #[tokio::test]
    async fn quit_ends_the_session() {
        let text = session("q\nn\n", None).await;
        assert!(text.contains("Goodbye."));
    }

    #[tokio::test]
    async fn end_of_input_ends_the_session() {
        let text = session("", None).await;
        assert!(text.contains("Enter a Wikimedia Commons category name"));
    }

    #[tokio::test]
    async fn help_lists_commands() {
        let text = session("h\nq\n", None).await;
        assert!(text.contains("goto <n>"));
    }

    #[tokio::test]
    async fn input_errors_are_reported() {
        let text = session("g 3\nq\n", None).await;
        assert!(text.contains("Error: No category loaded"), "{text}");
    }

    #[tokio::test]
    async fn initial_category_is_loaded_and_shown() {
        let mut app = app();
        let mut out = Vec::new();
        // Input stays open until the load finished, then quits.
        let (client, server) = tokio::io::duplex(64);
        let reader = tokio::io::BufReader::new(server);
        let writer_task = tokio::spawn(async move {
            let mut client = client;
            tokio::time::sleep(std::time::Duration::from_millis(200)).await;
            client.write_all(b"n\nq\n").await.unwrap();
            client
        });

        run_session(
            &mut app,
            &english(),
            reader,
            &mut out,
            Some("Trains".to_string()),
        )
        .await
        .unwrap();
        let _ = writer_task.await;

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("Loading category: Trains..."), "{text}");
        assert!(text.contains("Loaded 2 images from Trains"), "{text}");
        assert!(text.contains("[1 / 2] A.jpg"), "{text}");
        assert!(text.contains("[2 / 2] B.jpg"), "{text}");
    }
}
