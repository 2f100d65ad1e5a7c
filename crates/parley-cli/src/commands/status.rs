//! Status command - server reachability and installed models.

use parley_client::{list_available_models, OllamaClient};

pub(crate) async fn run(client: &OllamaClient) -> miette::Result<()> {
    println!("Ollama server:    {} (running)", client.base_url());
    println!();

    let installed = client.list_installed_models().await;
    if installed.is_empty() {
        println!("No models installed yet");
    } else {
        println!("Installed models:");
        for model in installed.iter() {
            println!("  - {}", model);
        }
    }

    println!();
    println!(
        "Available models: {} models in catalog",
        list_available_models().len()
    );

    println!();
    println!("Tips:");
    println!("  - Larger models provide better responses but require more RAM");
    println!("  - Keep the Ollama server running in the background");
    println!("  - First-time model downloads can be large");

    Ok(())
}
