//! Pull command - download a model through the server.

use indicatif::{ProgressBar, ProgressStyle};
use parley_client::{OllamaClient, PullProgress};

pub(crate) async fn run(client: &OllamaClient, name: &str) -> miette::Result<()> {
    let installed = client.list_installed_models().await;
    if installed.contains(name) {
        println!("Model '{}' is already installed.", name);
        return Ok(());
    }

    println!("Downloading {}... This may take a while.", name);

    let pb = ProgressBar::new(100);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos:>3}% {msg}")
            .map_err(|e| miette::miette!("Invalid progress bar template: {}", e))?
            .progress_chars("#>-"),
    );

    let success = client
        .pull_model(name, |progress: &PullProgress| {
            pb.set_message(progress.status.clone());
            match progress.percent() {
                Some(percent) => pb.set_position(percent as u64),
                None => pb.tick(),
            }
        })
        .await;

    if success {
        pb.finish_with_message("done");
        println!("{} downloaded successfully!", name);
        Ok(())
    } else {
        pb.abandon_with_message("failed");
        Err(miette::miette!("Failed to download {}", name))
    }
}
