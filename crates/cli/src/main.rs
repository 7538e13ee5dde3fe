use std::sync::Arc;

use rustyline::error::ReadlineError;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;
use triage_core::config::TriageCfg;
use triage_core::io::input::{self, InputSender};
use triage_core::io::output::OutputReceiver;
use triage_core::runtime::Runtime;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .init();

    let cfg = TriageCfg::from_env();
    let engine = triage_core::engine::shared();
    tracing::info!(facts = engine.knowledge().facts().len(), "triage REPL starting");

    let (runtime, input_tx, output_rx) = Runtime::new(Arc::clone(&engine), &cfg);
    let token = runtime.token();
    spawn_sigint_canceler(token.clone());

    let repl_token = token.clone();
    let runtime_fut = runtime.run();
    let repl_fut = run_repl(input_tx, output_rx, repl_token);
    tokio::pin!(runtime_fut);
    tokio::pin!(repl_fut);

    tokio::select! {
        _ = &mut runtime_fut => {
            token.cancel();
            (&mut repl_fut).await
        }
        result = &mut repl_fut => {
            token.cancel();
            (&mut runtime_fut).await;
            result
        }
    }
}

async fn run_repl(
    input_tx: InputSender,
    mut output_rx: OutputReceiver,
    token: CancellationToken,
) -> anyhow::Result<()> {
    let (line_tx, mut line_rx) = mpsc::unbounded_channel::<InputEvent>();
    let (ready_tx, ready_rx) = std::sync::mpsc::channel::<()>();
    spawn_input_thread(line_tx, ready_rx);

    loop {
        tokio::select! {
            _ = token.cancelled() => {
                break;
            }
            line = line_rx.recv() => {
                let Some(line) = line else {
                    break;
                };
                match line {
                    InputEvent::Line(line) => {
                        let text = line.trim();
                        if text.is_empty() {
                            request_next_prompt(&ready_tx);
                            continue;
                        }
                        if matches!(text, "/q" | "/exit" | "/quit") {
                            break;
                        }
                        if input::submit_text(&input_tx, text.to_owned()).await.is_err() {
                            break;
                        }
                    }
                    InputEvent::Interrupted => {
                        token.cancel();
                        break;
                    }
                    InputEvent::Eof => break,
                    InputEvent::Error(err) => {
                        eprintln!("input error: {err}");
                        break;
                    }
                }
            }
            reply = output_rx.recv() => {
                let Some(reply) = reply else {
                    break;
                };
                println!("{}\n", reply.content);
                // Advisor replies can come in bursts (analysis plus an
                // urgent follow-up); prompt again once the burst drains.
                if output_rx.is_empty() {
                    request_next_prompt(&ready_tx);
                }
            }
        }
    }
    drop(ready_tx);

    // Drain any final messages (e.g. the session summary) before exiting.
    while let Ok(reply) = output_rx.try_recv() {
        println!("{}\n", reply.content);
    }
    Ok(())
}

fn request_next_prompt(ready_tx: &std::sync::mpsc::Sender<()>) {
    let _ = ready_tx.send(());
}

fn spawn_input_thread(
    line_tx: mpsc::UnboundedSender<InputEvent>,
    ready_rx: std::sync::mpsc::Receiver<()>,
) {
    std::thread::spawn(move || {
        let mut editor = match rustyline::DefaultEditor::new() {
            Ok(editor) => editor,
            Err(e) => {
                let _ = line_tx.send(InputEvent::Error(e.to_string()));
                return;
            }
        };

        while ready_rx.recv().is_ok() {
            match editor.readline("You> ") {
                Ok(line) => {
                    if line_tx.send(InputEvent::Line(line)).is_err() {
                        break;
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    let _ = line_tx.send(InputEvent::Interrupted);
                    break;
                }
                Err(ReadlineError::Eof) => {
                    let _ = line_tx.send(InputEvent::Eof);
                    break;
                }
                Err(e) => {
                    let _ = line_tx.send(InputEvent::Error(e.to_string()));
                    break;
                }
            }
        }
    });
}

enum InputEvent {
    Line(String),
    Interrupted,
    Eof,
    Error(String),
}

fn spawn_sigint_canceler(token: CancellationToken) {
    tokio::spawn(async move {
        #[cfg(unix)]
        {
            if let Ok(mut sigint) =
                tokio::signal::unix::signal(tokio::signal::unix::SignalKind::interrupt())
            {
                let _ = sigint.recv().await;
                token.cancel();
            }
        }
        #[cfg(not(unix))]
        {
            if tokio::signal::ctrl_c().await.is_ok() {
                token.cancel();
            }
        }
    });
}
