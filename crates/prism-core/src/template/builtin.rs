//! Built-in template catalog.
//!
//! These ship with Prism and are registered before any user templates, so a
//! user file can override any of them by name or claim their aliases.

use super::registry::Template;

/// One built-in template entry.
struct BuiltinTemplate {
    name: &'static str,
    prompt: &'static str,
    description: &'static str,
    aliases: &'static [&'static str],
}

/// Catalog order is registration order.
const BUILTIN_TEMPLATES: &[BuiltinTemplate] = &[
    BuiltinTemplate {
        name: "remove-bg",
        prompt: "Isolate the main subject and make the background fully transparent, \
                 removing every trace of the original backdrop",
        description: "Remove the background, leaving a transparent backdrop",
        aliases: &["removebg", "nobg", "background-remove"],
    },
    BuiltinTemplate {
        name: "enhance",
        prompt: "Improve this image's overall quality: balance the lighting, sharpen \
                 soft areas, and make the colors richer and more vivid",
        description: "Auto-improve lighting, sharpness, and color",
        aliases: &["improve", "fix", "auto-enhance"],
    },
    BuiltinTemplate {
        name: "upscale",
        prompt: "Increase this image's resolution, reconstructing fine detail so it \
                 stays crisp and natural at the larger size",
        description: "Increase resolution with reconstructed detail",
        aliases: &["resize", "enlarge", "hd"],
    },
    BuiltinTemplate {
        name: "vintage",
        prompt: "Give this image a vintage film look with faded colors, gentle grain, \
                 and the warm cast of an old 35mm print",
        description: "Faded warm tones and film grain",
        aliases: &["retro", "film", "old-photo"],
    },
    BuiltinTemplate {
        name: "sepia",
        prompt: "Recolor this image in warm sepia brown tones for an antique \
                 photograph feel",
        description: "Classic warm brown monochrome",
        aliases: &["brown", "antique"],
    },
    BuiltinTemplate {
        name: "sharpen",
        prompt: "Sharpen this image noticeably, bringing out edge definition and fine \
                 texture without introducing halos",
        description: "Boost edge definition and texture",
        aliases: &["crisp", "clarity"],
    },
    BuiltinTemplate {
        name: "bw",
        prompt: "Convert this image to high-contrast black and white with deep blacks \
                 and bright highlights",
        description: "High-contrast black and white",
        aliases: &["blackwhite", "grayscale", "mono", "monochrome"],
    },
    BuiltinTemplate {
        name: "blur-bg",
        prompt: "Keep the subject tack sharp and blur the background into smooth \
                 creamy bokeh, like a portrait shot at a wide aperture",
        description: "Blur the background behind a sharp subject",
        aliases: &["bokeh", "portrait-mode", "depth"],
    },
    BuiltinTemplate {
        name: "cartoon",
        prompt: "Redraw this image as a cartoon with clean bold outlines and flat \
                 saturated colors",
        description: "Bold-outline cartoon restyle",
        aliases: &["animate", "comic", "illustrated"],
    },
    BuiltinTemplate {
        name: "watercolor",
        prompt: "Repaint this image as a soft watercolor with translucent washes and \
                 visible brush texture",
        description: "Soft watercolor painting restyle",
        aliases: &["painting", "artistic"],
    },
];

/// Materialize the catalog in registration order.
pub(crate) fn builtin_templates() -> impl Iterator<Item = Template> {
    BUILTIN_TEMPLATES.iter().map(|entry| Template {
        name: entry.name.to_string(),
        prompt: entry.prompt.to_string(),
        description: entry.description.to_string(),
        aliases: entry.aliases.iter().map(|a| a.to_string()).collect(),
    })
}
