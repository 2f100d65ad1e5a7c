//! Model catalog commands.

use parley_client::{describe_model, is_known_model, list_available_models, OllamaClient};

use super::install_marker;

/// List catalog models with an install marker.
pub(crate) async fn list(client: &OllamaClient) -> miette::Result<()> {
    let installed = client.list_installed_models().await;

    println!(
        "Models ({} = installed, {} = needs download):",
        install_marker(true),
        install_marker(false)
    );
    for name in list_available_models() {
        let model = describe_model(name, &installed);
        println!(
            "  {} {:<18} {:>7}  {}",
            install_marker(model.installed),
            model.name,
            model.size,
            model.description
        );
    }

    Ok(())
}

/// Show details about one model.
pub(crate) async fn info(client: &OllamaClient, name: &str) -> miette::Result<()> {
    let installed = client.list_installed_models().await;
    let model = describe_model(name, &installed);

    println!("Model Details");
    println!("=============");
    println!("Name:           {}", model.name);
    println!("Estimated Size: {}", model.size);
    println!("Description:    {}", model.description);
    println!(
        "Status:         {}",
        if model.installed { "Installed" } else { "Not Installed" }
    );

    if !is_known_model(name) {
        println!();
        println!(
            "Note: '{}' is not in the built-in catalog; details are guesses.",
            name
        );
    }

    if !model.installed {
        println!();
        println!("To download it, run:");
        println!("  parley pull {}", model.name);
    }

    Ok(())
}
