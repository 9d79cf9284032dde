use clap::Parser;
use polyslider::config;
use polyslider_gtk::cli::Cli;
use polyslider_gtk::gui::app::AppModel;
use polyslider_gtk::sys::runtime;
use relm4::prelude::*;

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    if cli.write_config {
        let path = config::write_default_config()?;
        println!("{}", path.display());
        return Ok(());
    }

    let config = cli.overrides.apply(config::load_or_default());

    let (tx, rx) = async_channel::bounded(32);

    // Start Background Services
    runtime::start_background_services(tx);

    // clap owns the command line; keep GTK from parsing it again
    let app = RelmApp::new("org.polyslider.demo").with_args(Vec::new());

    app.run::<AppModel>((config, cli.overrides, rx));
    Ok(())
}
