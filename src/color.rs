use std::collections::{HashMap, HashSet};

use eframe::egui::Color32;
use palette::Srgb;
use rand::seq::SliceRandom;
use rand::Rng;

// ---------------------------------------------------------------------------
// Named colours
// ---------------------------------------------------------------------------

/// A CSS colour keyword with its sRGB value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NamedColor {
    pub name: &'static str,
    pub rgb: Srgb<u8>,
}

impl NamedColor {
    /// Resolve a CSS keyword, if palette knows it.
    pub fn from_name(name: &'static str) -> Option<Self> {
        palette::named::from_str(name).map(|rgb| NamedColor { name, rgb })
    }

    fn key(self) -> (u8, u8, u8) {
        (self.rgb.red, self.rgb.green, self.rgb.blue)
    }

    pub fn to_color32(self) -> Color32 {
        Color32::from_rgb(self.rgb.red, self.rgb.green, self.rgb.blue)
    }

    /// Same colour at `alpha` opacity (0.0 transparent, 1.0 opaque).
    pub fn to_color32_alpha(self, alpha: f32) -> Color32 {
        let a = (alpha.clamp(0.0, 1.0) * 255.0).round() as u8;
        Color32::from_rgba_unmultiplied(self.rgb.red, self.rgb.green, self.rgb.blue, a)
    }
}

/// Fixed colours for the plastic types that are always expected.
pub const BASE_COLORS: [(&str, &str); 5] = [
    ("plastic_bottle", "blue"),
    ("fishing_net", "green"),
    ("plastic_bag", "red"),
    ("microplastic", "purple"),
    ("other", "orange"),
];

/// Used once the palette runs dry, and for types never assigned.
pub const FALLBACK_COLOR: NamedColor = NamedColor {
    name: "gray",
    rgb: Srgb::new(128, 128, 128),
};

/// CSS Color Module Level 4 keywords.
const CSS4_NAMES: &[&str] = &[
    "aliceblue", "antiquewhite", "aqua", "aquamarine", "azure", "beige", "bisque", "black",
    "blanchedalmond", "blue", "blueviolet", "brown", "burlywood", "cadetblue", "chartreuse",
    "chocolate", "coral", "cornflowerblue", "cornsilk", "crimson", "cyan", "darkblue",
    "darkcyan", "darkgoldenrod", "darkgray", "darkgreen", "darkgrey", "darkkhaki",
    "darkmagenta", "darkolivegreen", "darkorange", "darkorchid", "darkred", "darksalmon",
    "darkseagreen", "darkslateblue", "darkslategray", "darkslategrey", "darkturquoise",
    "darkviolet", "deeppink", "deepskyblue", "dimgray", "dimgrey", "dodgerblue", "firebrick",
    "floralwhite", "forestgreen", "fuchsia", "gainsboro", "ghostwhite", "gold", "goldenrod",
    "gray", "green", "greenyellow", "grey", "honeydew", "hotpink", "indianred", "indigo",
    "ivory", "khaki", "lavender", "lavenderblush", "lawngreen", "lemonchiffon", "lightblue",
    "lightcoral", "lightcyan", "lightgoldenrodyellow", "lightgray", "lightgreen", "lightgrey",
    "lightpink", "lightsalmon", "lightseagreen", "lightskyblue", "lightslategray",
    "lightslategrey", "lightsteelblue", "lightyellow", "lime", "limegreen", "linen",
    "magenta", "maroon", "mediumaquamarine", "mediumblue", "mediumorchid", "mediumpurple",
    "mediumseagreen", "mediumslateblue", "mediumspringgreen", "mediumturquoise",
    "mediumvioletred", "midnightblue", "mintcream", "mistyrose", "moccasin", "navajowhite",
    "navy", "oldlace", "olive", "olivedrab", "orange", "orangered", "orchid", "palegoldenrod",
    "palegreen", "paleturquoise", "palevioletred", "papayawhip", "peachpuff", "peru", "pink",
    "plum", "powderblue", "purple", "rebeccapurple", "red", "rosybrown", "royalblue",
    "saddlebrown", "salmon", "sandybrown", "seagreen", "seashell", "sienna", "silver",
    "skyblue", "slateblue", "slategray", "slategrey", "snow", "springgreen", "steelblue",
    "tan", "teal", "thistle", "tomato", "turquoise", "violet", "wheat", "white", "whitesmoke",
    "yellow", "yellowgreen",
];

fn base_colors() -> Vec<(&'static str, NamedColor)> {
    BASE_COLORS
        .iter()
        .filter_map(|&(ty, name)| NamedColor::from_name(name).map(|c| (ty, c)))
        .collect()
}

/// CSS4 colours minus the base colours, the fallback and any alias that
/// repeats an sRGB value already in the list.
pub fn css4_palette() -> Vec<NamedColor> {
    let mut taken: HashSet<(u8, u8, u8)> = base_colors()
        .iter()
        .map(|(_, c)| c.key())
        .collect();
    taken.insert(FALLBACK_COLOR.key());

    let mut colors = Vec::with_capacity(CSS4_NAMES.len());
    for &name in CSS4_NAMES {
        let Some(color) = NamedColor::from_name(name) else {
            log::debug!("Colour keyword '{name}' unknown to palette, skipped");
            continue;
        };
        if taken.insert(color.key()) {
            colors.push(color);
        }
    }
    colors
}

// ---------------------------------------------------------------------------
// ColorAssigner: plastic type → colour, stable for a session
// ---------------------------------------------------------------------------

/// Session-scoped memo from plastic type to display colour.
///
/// Known types get their base colour. Any other type takes the next colour
/// from a palette shuffled once at construction, on first encounter, and
/// keeps it for the rest of the session.
#[derive(Debug, Clone)]
pub struct ColorAssigner {
    assigned: HashMap<String, NamedColor>,
    /// Remaining colours; assignment pops from the back.
    palette: Vec<NamedColor>,
}

impl ColorAssigner {
    /// Fresh session with the CSS4 palette shuffled by `rng`.
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut palette = css4_palette();
        palette.shuffle(rng);
        Self::with_palette(palette)
    }

    /// Fresh session drawing from `palette` in back-to-front order.
    pub fn with_palette(palette: Vec<NamedColor>) -> Self {
        let assigned = base_colors()
            .into_iter()
            .map(|(ty, c)| (ty.to_string(), c))
            .collect();
        Self { assigned, palette }
    }

    /// Make sure every type in `types` has a colour.
    pub fn assign<'t>(&mut self, types: impl IntoIterator<Item = &'t str>) {
        for ty in types {
            if self.assigned.contains_key(ty) {
                continue;
            }
            let color = match self.palette.pop() {
                Some(c) => c,
                None => {
                    log::warn!("Colour palette exhausted, '{ty}' falls back to gray");
                    FALLBACK_COLOR
                }
            };
            log::debug!(
                "Assigned {} to plastic type '{ty}' ({} palette colours left)",
                color.name,
                self.remaining()
            );
            self.assigned.insert(ty.to_string(), color);
        }
    }

    pub fn get(&self, plastic_type: &str) -> Option<NamedColor> {
        self.assigned.get(plastic_type).copied()
    }

    /// Assigned colour, or gray for a type this session has not seen.
    pub fn color_for(&self, plastic_type: &str) -> NamedColor {
        self.get(plastic_type).unwrap_or(FALLBACK_COLOR)
    }

    /// Palette colours still available.
    pub fn remaining(&self) -> usize {
        self.palette.len()
    }
}
