use crate::cli::ConfigOverrides;
use crate::events::AppEvent;
use crate::gui::theme::{self, ThemeColors};
use crate::gui::{DEFAULT_HEIGHT, DEFAULT_WIDTH, view};
use gtk::prelude::*;
use gtk4 as gtk;
use polyslider::config;
use polyslider::{Bounds, Options, Point, PolySlider, SliderConfig};
use relm4::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;

pub struct AppModel {
    pub slider: Rc<RefCell<Option<PolySlider>>>,
    pub config: SliderConfig,
    pub overrides: ConfigOverrides,
    pub bounds: Bounds,
    pub drag_origin: Option<Point>,
    pub drawing_area: gtk::DrawingArea,
}

#[derive(Debug)]
pub enum AppMsg {
    PointerDown(Point),
    PointerDrag(f64, f64),
    PointerUp,
    PointerLeave,
    Resize(f64, f64),
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

/// Consumer side of the selector: reports every change on stdout.
fn report_selection(option: usize, level: usize) {
    log::info!("Option {} set to level {}", option, level);
    println!("{option} {level}");
}

fn build_slider(bounds: Bounds, config: &SliderConfig) -> Option<PolySlider> {
    let options = Options::new(config.clone()).on_selection_changed(report_selection);
    match PolySlider::create(bounds, options) {
        Ok(slider) => Some(slider),
        Err(e) => {
            log::error!("Failed to build slider: {}", e);
            None
        }
    }
}

impl AppModel {
    fn rebuild(&mut self) {
        self.drag_origin = None;
        *self.slider.borrow_mut() = build_slider(self.bounds, &self.config);
        self.drawing_area.queue_draw();
    }
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = (
        SliderConfig,
        ConfigOverrides,
        async_channel::Receiver<AppEvent>,
    );
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        #[name = "window"]
        gtk::ApplicationWindow {
            set_title: Some("PolySlider"),
            set_default_size: (DEFAULT_WIDTH, DEFAULT_HEIGHT),

            add_controller = gtk::EventControllerKey {
                connect_key_pressed[sender] => move |_, key, _, _| {
                    if key == gtk::gdk::Key::Escape {
                        sender.input(AppMsg::Quit);
                        return glib::Propagation::Stop;
                    }
                    glib::Propagation::Proceed
                }
            },

            #[name = "drawing_area"]
            gtk::DrawingArea {
                set_hexpand: true,
                set_vexpand: true,
                add_css_class: "polyslider-area",

                connect_resize[sender] => move |_, width, height| {
                    sender.input(AppMsg::Resize(width as f64, height as f64));
                },

                add_controller = gtk::GestureDrag {
                    connect_drag_begin[sender] => move |_, x, y| {
                        sender.input(AppMsg::PointerDown(Point::new(x, y)));
                    },
                    connect_drag_update[sender] => move |_, dx, dy| {
                        sender.input(AppMsg::PointerDrag(dx, dy));
                    },
                    connect_drag_end[sender] => move |_, _, _| {
                        sender.input(AppMsg::PointerUp);
                    },
                },

                add_controller = gtk::EventControllerMotion {
                    connect_leave[sender] => move |_| {
                        sender.input(AppMsg::PointerLeave);
                    }
                },
            }
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let (config, overrides, rx) = init;

        theme::load_css();

        let bounds = Bounds::new(DEFAULT_WIDTH as f64, DEFAULT_HEIGHT as f64);
        let model = AppModel {
            slider: Rc::new(RefCell::new(build_slider(bounds, &config))),
            config,
            overrides,
            bounds,
            drag_origin: None,
            drawing_area: gtk::DrawingArea::default(),
        };

        let widgets = view_output!();

        let mut model = model;
        model.drawing_area = widgets.drawing_area.clone();

        let slider_draw = model.slider.clone();
        widgets
            .drawing_area
            .set_draw_func(move |drawing_area, cr, _, _| {
                let style_context = drawing_area.style_context();
                let colors = ThemeColors::from_context(&style_context);
                if let Some(slider) = slider_draw.borrow().as_ref()
                    && let Err(e) = view::draw(cr, slider, &colors)
                {
                    log::error!("Drawing error: {}", e);
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
            AppMsg::PointerDown(at) => {
                self.drag_origin = Some(at);
                if let Some(slider) = self.slider.borrow_mut().as_mut() {
                    slider.pointer_down_at(at);
                }
            }
            AppMsg::PointerDrag(dx, dy) => {
                let Some(origin) = self.drag_origin else {
                    return;
                };
                let moved = self
                    .slider
                    .borrow_mut()
                    .as_mut()
                    .and_then(|slider| slider.pointer_move(origin.offset(dx, dy)))
                    .is_some();
                if moved {
                    self.drawing_area.queue_draw();
                }
            }
            AppMsg::PointerUp => {
                self.drag_origin = None;
                if let Some(slider) = self.slider.borrow_mut().as_mut() {
                    slider.pointer_up();
                }
            }
            AppMsg::PointerLeave => {
                self.drag_origin = None;
                if let Some(slider) = self.slider.borrow_mut().as_mut() {
                    slider.pointer_leave();
                }
            }
            AppMsg::Resize(width, height) => {
                let bounds = Bounds::new(width, height);
                if bounds != self.bounds {
                    self.bounds = bounds;
                    self.rebuild();
                }
            }
            AppMsg::ConfigReload => match config::load_config() {
                Ok(new_config) => {
                    self.config = self.overrides.apply(new_config);
                    self.rebuild();
                    log::info!("Configuration reloaded");
                }
                Err(e) => log::error!("Failed to reload config: {}", e),
            },
            AppMsg::Quit => relm4::main_application().quit(),
        }
    }
}
