use clap::Parser;
use quizkit::app::state::AppState;
use quizkit::config::{Command, StartArgs, DEFAULT_MAX_QUERY_LENGTH, DEFAULT_SEARCH_LIMIT};
use quizkit::core::document::parser::Parser as DocumentParser;
use quizkit::core::document::DocumentType;
use quizkit::core::safety::{check_input, SafetyVerdict};
use quizkit::core::telemetry::{TelemetryEvent, TelemetrySink};
use quizkit::error::QuizkitError;
use serde_json::json;
use std::path::Path;

#[tokio::main]
async fn main() {
    let args = StartArgs::parse();
    let app = AppState::new(&args);

    let corpus = &app.services.corpus;

    match &args.command {
        Command::Ingest { path } => {
            let input = tokio::fs::read(path)
                .await
                .unwrap_or_else(|e| exit_with(&format!("unable to read '{path}': {e}")));

            let parser = DocumentParser::new(DocumentType::from_path(Path::new(path)));
            let extract = parser.parse(&input).unwrap_or_else(exit_with_err);

            let report = corpus.ingest(&extract.text).await.unwrap_or_else(exit_with_err);

            app.telemetry
                .record(TelemetryEvent::new(
                    "ingest",
                    json!({
                        "path": path,
                        "pages": extract.pages,
                        "chunks": report.ids.len(),
                        "degraded": report.degraded,
                    }),
                ))
                .await;

            print_json(&report);
        }

        Command::Search { query, limit } => {
            if let SafetyVerdict::Unsafe(reason) = check_input(query, DEFAULT_MAX_QUERY_LENGTH) {
                app.telemetry
                    .record(TelemetryEvent::new(
                        "search_refused",
                        json!({ "reason": reason }),
                    ))
                    .await;
                exit_with(&format!("query refused: {reason}"));
            }

            let limit = limit.unwrap_or(DEFAULT_SEARCH_LIMIT);
            let report = corpus.search(query, limit).await.unwrap_or_else(exit_with_err);

            app.telemetry
                .record(TelemetryEvent::new(
                    "search",
                    json!({
                        "query": query,
                        "limit": limit,
                        "results": report.hits.len(),
                        "degraded": report.degraded,
                    }),
                ))
                .await;

            print_json(&report);
        }

        Command::Reset => {
            corpus.reset().await.unwrap_or_else(exit_with_err);

            app.telemetry
                .record(TelemetryEvent::new("reset", json!({})))
                .await;

            println!("corpus reset");
        }
    }
}

fn print_json<T: serde::Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(out) => println!("{out}"),
        Err(e) => exit_with(&format!("unable to serialize output: {e}")),
    }
}

fn exit_with(message: &str) -> ! {
    eprintln!("{message}");
    std::process::exit(1);
}

fn exit_with_err<T>(e: QuizkitError) -> T {
    e.print();
    std::process::exit(1);
}
