use gtk::gdk;
use gtk::prelude::*;
use gtk4 as gtk;
use palette::Srgba;
use polyslider::StyleClass;

pub struct ThemeColors {
    pub vertex: Srgba<f64>,
    pub marker: Srgba<f64>,
    pub group_edge: Srgba<f64>,
    pub background: Srgba<f64>,
}

impl ThemeColors {
    pub fn from_context(context: &gtk::StyleContext) -> Self {
        Self {
            vertex: Self::lookup_color(
                context,
                "theme_unfocused_fg_color",
                Srgba::new(0.78, 0.78, 0.78, 0.6),
                Some(0.6),
            ),
            marker: Self::lookup_color(
                context,
                "accent_bg_color",
                Srgba::new(0.26, 0.96, 0.64, 1.0),
                None,
            ),
            group_edge: Self::lookup_color(
                context,
                "theme_unfocused_fg_color",
                Srgba::new(0.78, 0.78, 0.78, 0.4),
                Some(0.4),
            ),
            background: Self::lookup_color(
                context,
                "theme_bg_color",
                Srgba::new(0.15, 0.15, 0.15, 1.0),
                None,
            ),
        }
    }

    pub fn for_style(&self, style: StyleClass) -> Srgba<f64> {
        match style {
            StyleClass::Static => self.vertex,
            StyleClass::Dynamic => self.marker,
            StyleClass::GroupEdge => self.group_edge,
        }
    }

    fn lookup_color(
        context: &gtk::StyleContext,
        name: &str,
        fallback: Srgba<f64>,
        alpha_override: Option<f64>,
    ) -> Srgba<f64> {
        context
            .lookup_color(name)
            .map(|c| {
                let (r, g, b, a) = (
                    c.red() as f64,
                    c.green() as f64,
                    c.blue() as f64,
                    c.alpha() as f64,
                );
                Srgba::new(r, g, b, alpha_override.unwrap_or(a))
            })
            .unwrap_or(fallback)
    }
}

pub fn load_css() {
    let provider = gtk::CssProvider::new();
    let css_data = "
.polyslider-area {
    cursor: default;
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
