use crate::prelude::{eprintln, *};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

/// Serve requests read line by line from stdin. Requests are handled one at a
/// time, so a submission is visible to every request that follows it.
pub async fn run_stdio(context: super::Context) -> Result<()> {
    if context.global.verbose {
        eprintln!(
            "Serving {} tools over stdio...",
            context.service.len().await
        );
        eprintln!();
    }

    let stdin = tokio::io::stdin();
    let mut stdout = tokio::io::stdout();
    let mut reader = BufReader::new(stdin);
    let mut line = String::new();

    loop {
        line.clear();
        let bytes_read = reader.read_line(&mut line).await?;

        if bytes_read == 0 {
            break; // EOF
        }

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        if context.global.verbose {
            eprintln!("Received: {trimmed}");
        }

        let response = super::handle_request(trimmed, &context).await;
        let response_json = serde_json::to_string(&response)?;

        if context.global.verbose {
            eprintln!("Sending: {response_json}");
        }

        stdout.write_all(response_json.as_bytes()).await?;
        stdout.write_all(b"\n").await?;
        stdout.flush().await?;
    }

    log::info!("stdin closed, stopping stdio server");
    Ok(())
}
