use crate::config::{self, AppConfig, WindowConfig};
use crate::events::AppEvent;
use crate::format::CurrencyFormatter;
use crate::gui::theme;
use arcdial::{CircularSlider, Insets, Point, PointerEvent, SliderConfig, ValueChangedListener};
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;

pub struct AppModel {
    pub slider: Rc<RefCell<CircularSlider>>,
    pub window: WindowConfig,
    pub value_label: String,
    pub root: gtk::ApplicationWindow,
    pub drawing_area: gtk::DrawingArea,
}

#[derive(Debug)]
pub enum AppMsg {
    DragUpdate(Point),
    DragEnd(Point),
    ValueChanged(i32),
    ConfigReload,
    Quit,
}

impl From<AppEvent> for AppMsg {
    fn from(event: AppEvent) -> Self {
        match event {
            AppEvent::ConfigReload => AppMsg::ConfigReload,
        }
    }
}

/// Logs accepted value changes; the listener-object half of the
/// subscription API (the label is fed through the callback half).
struct LogListener;

impl ValueChangedListener for LogListener {
    fn on_value_changed(&self, _slider: &CircularSlider, value: i32) {
        log::debug!("slider value changed to {value}");
    }
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = (AppConfig, async_channel::Receiver<AppEvent>);
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        #[name = "window"]
        gtk::ApplicationWindow {
            set_title: Some("arcdial"),
            set_default_size: (model.window.width, model.window.height),
            add_css_class: "arcdial-window",

            add_controller = gtk::EventControllerKey {
                connect_key_pressed[sender] => move |_, key, _, _| {
                    if key == gtk::gdk::Key::Escape {
                        sender.input(AppMsg::Quit);
                        return glib::Propagation::Stop;
                    }
                    glib::Propagation::Proceed
                }
            },

            gtk::Overlay {
                #[name = "drawing_area"]
                gtk::DrawingArea {
                    set_hexpand: true,
                    set_vexpand: true,
                    add_css_class: "arcdial-canvas",

                    add_controller = gtk::GestureDrag {
                        connect_drag_begin[slider] => move |gesture, x, y| {
                            let action = slider
                                .borrow_mut()
                                .handle_pointer(PointerEvent::Down(Point::new(x, y)));
                            // claiming has to happen inside the signal handler,
                            // before GTK picks an owner for the sequence
                            if action.claim_gesture {
                                gesture.set_state(gtk::EventSequenceState::Claimed);
                            }
                        },
                        connect_drag_update[sender] => move |gesture, dx, dy| {
                            if let Some((sx, sy)) = gesture.start_point() {
                                sender.input(AppMsg::DragUpdate(Point::new(sx + dx, sy + dy)));
                            }
                        },
                        connect_drag_end[sender] => move |gesture, dx, dy| {
                            if let Some((sx, sy)) = gesture.start_point() {
                                sender.input(AppMsg::DragEnd(Point::new(sx + dx, sy + dy)));
                            }
                        }
                    },
                },

                add_overlay = &gtk::Label {
                    add_css_class: "arcdial-toast",
                    set_halign: gtk::Align::Center,
                    set_valign: gtk::Align::End,
                    set_margin_bottom: 24,
                    #[watch]
                    set_label: &model.value_label,
                    #[watch]
                    set_visible: !model.value_label.is_empty(),
                }
            }
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let (app_config, rx) = init;

        theme::load_css();

        let slider = Rc::new(RefCell::new(CircularSlider::new(app_config.slider)));
        {
            let mut slider = slider.borrow_mut();
            slider.set_value_formatter(CurrencyFormatter);
            slider.add_value_changed_listener(LogListener);
            let relm_sender = sender.clone();
            slider.add_value_changed_callback(move |_, value| {
                relm_sender.input(AppMsg::ValueChanged(value));
            });
        }

        let model = AppModel {
            slider: slider.clone(),
            window: app_config.window,
            value_label: String::new(),
            root: root.clone(),
            drawing_area: gtk::DrawingArea::default(),
        };

        let widgets = view_output!();

        let mut model = model;
        model.drawing_area = widgets.drawing_area.clone();

        let scale = f64::from(widgets.drawing_area.scale_factor());
        let side = f64::from(model.window.width.min(model.window.height));
        let measured = slider.borrow().measure(side, scale, Insets::default());
        widgets.drawing_area.set_content_width(measured.width as i32);
        widgets
            .drawing_area
            .set_content_height(measured.height as i32);

        let state_draw = slider.clone();
        widgets
            .drawing_area
            .set_draw_func(move |drawing_area, cr, width, height| {
                let scale = f64::from(drawing_area.scale_factor());
                let mut slider = state_draw.borrow_mut();
                let insets = slider.resolve_insets(Insets::default(), scale);
                if let Err(e) = slider.render(cr, f64::from(width), f64::from(height), insets) {
                    log::error!("Drawing error: {e}");
                }
            });

        let sender_clone = sender.clone();
        relm4::spawn(async move {
            while let Ok(event) = rx.recv().await {
                sender_clone.input(AppMsg::from(event));
            }
        });

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, _sender: ComponentSender<Self>) {
        match msg {
            AppMsg::DragUpdate(point) => {
                let action = self
                    .slider
                    .borrow_mut()
                    .handle_pointer(PointerEvent::Move(point));
                if action.should_redraw {
                    self.drawing_area.queue_draw();
                }
            }
            AppMsg::DragEnd(point) => {
                self.slider
                    .borrow_mut()
                    .handle_pointer(PointerEvent::Up(point));
            }
            AppMsg::ValueChanged(_) => {
                self.value_label = self.slider.borrow().display_text();
            }
            AppMsg::ConfigReload => match config::load_config() {
                Ok(new_config) => {
                    self.apply_slider_config(&new_config.slider);
                    log::info!("Configuration reloaded");
                }
                Err(e) => log::error!("Failed to reload config: {e}"),
            },
            AppMsg::Quit => self.root.close(),
        }
    }
}

impl AppModel {
    /// Pushes a reloaded config through the widget setters; each setter
    /// latches a re-render request, drained into one redraw here.
    fn apply_slider_config(&self, cfg: &SliderConfig) {
        let mut slider = self.slider.borrow_mut();
        slider.set_min_value(cfg.min_value);
        slider.set_max_value(cfg.max_value);
        slider.set_step_value(cfg.step_value);
        slider.set_show_value_text(cfg.show_value_text);
        slider.set_slider_width(cfg.slider_width);
        slider.set_slider_color(cfg.slider_color);
        slider.set_value_text_size(cfg.value_text_size);
        slider.set_value_text_color(cfg.value_text_color);
        if let Some(value) = cfg.current_value {
            slider.set_current_value(value);
        }
        if slider.take_render_request() {
            self.drawing_area.queue_draw();
        }
    }
}
