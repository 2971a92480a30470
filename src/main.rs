mod app;
mod braid;
mod layout;
mod util;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Directory containing braid JSON files.
    #[arg(long, default_value = "tests/braids")]
    braids_dir: String,
}

fn main() -> eframe::Result<()> {
    let args = Args::parse();
    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default().with_inner_size([1440.0, 920.0]),
        ..Default::default()
    };

    eframe::run_native(
        "braidview",
        options,
        Box::new(move |cc| Ok(Box::new(app::BraidViewApp::new(cc, args.braids_dir.clone())))),
    )
}
