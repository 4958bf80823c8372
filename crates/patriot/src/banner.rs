//! Startup welcome screen.

use owo_colors::OwoColorize;

const BOX_WIDTH: usize = 50;

const BLOCK_ART: &str = r#"
██████╗  █████╗ ████████╗██████╗ ██╗ ██████╗ ████████╗
██╔══██╗██╔══██╗╚══██╔══╝██╔══██╗██║██╔═══██╗╚══██╔══╝
██████╔╝███████║   ██║   ██████╔╝██║██║   ██║   ██║
██╔═══╝ ██╔══██║   ██║   ██╔══██╗██║██║   ██║   ██║
██║     ██║  ██║   ██║   ██║  ██║██║╚██████╔╝   ██║
╚═╝     ╚═╝  ╚═╝   ╚═╝   ╚═╝  ╚═╝╚═╝ ╚═════╝    ╚═╝
"#;

/// Print the welcome box, block art, and usage hint
pub fn print_banner() {
    let title = "Welcome to Patriot";
    let padding = (BOX_WIDTH - title.len() - 2) / 2;
    let trailing = BOX_WIDTH - title.len() - padding - 2;

    println!("\n");
    println!("{}", "═".repeat(BOX_WIDTH).red());
    println!(
        "{}{}{}{}{}",
        "║".red(),
        " ".repeat(padding),
        title.bold(),
        " ".repeat(trailing),
        "║".red()
    );
    println!("{}", "═".repeat(BOX_WIDTH).red());
    println!("{}", BLOCK_ART.red().bold());
    println!("Your AI assistant for cybersecurity.");
    println!("Ask me any questions. Type 'exit' or 'quit' to end.");
    println!();
}
