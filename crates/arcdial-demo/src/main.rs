use arcdial_demo::config;
use arcdial_demo::gui::app::AppModel;
use arcdial_demo::sys::runtime;
use relm4::prelude::*;

fn main() {
    env_logger::init();

    let config = config::load_or_setup();

    let (tx, rx) = async_channel::bounded(32);

    runtime::start_background_services(tx);

    let app = RelmApp::new("org.troia.arcdial");

    app.run::<AppModel>((config, rx));
}
