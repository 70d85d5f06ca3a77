use gtk::gdk;
use gtk::prelude::*;
use gtk4 as gtk;

pub fn load_css() {
    let provider = gtk::CssProvider::new();
    let css_data = "
.arcdial-canvas {
    background: none;
    background-color: transparent;
}
.arcdial-toast {
    background-color: rgba(0, 0, 0, 0.7);
    color: white;
    border-radius: 16px;
    padding: 6px 18px;
}
";
    provider.load_from_data(css_data);

    if let Some(display) = gdk::Display::default() {
        gtk::style_context_add_provider_for_display(
            &display,
            &provider,
            gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
        );
    }
}
