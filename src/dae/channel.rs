use std::{fmt, str::FromStr};

/// One texture slot of a COLLADA phong material.
///
/// The variant determines both the element name created under `<phong>` and
/// the `<channel>map` id shared by the phong texture reference and its
/// `library_images` entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureChannel {
    Diffuse,
    Ambient,
    Bump,
    Specular,
    Reflective,
    Transparent,
}

impl TextureChannel {
    pub const ALL: [TextureChannel; 6] = [
        TextureChannel::Diffuse,
        TextureChannel::Ambient,
        TextureChannel::Bump,
        TextureChannel::Specular,
        TextureChannel::Reflective,
        TextureChannel::Transparent,
    ];

    /// Element name under `<phong>`.
    pub fn element_name(&self) -> &'static str {
        match self {
            TextureChannel::Diffuse => "diffuse",
            TextureChannel::Ambient => "ambient",
            TextureChannel::Bump => "bump",
            TextureChannel::Specular => "specular",
            TextureChannel::Reflective => "reflective",
            TextureChannel::Transparent => "transparent",
        }
    }

    /// Shared id of the phong texture reference and the paired image entry.
    pub fn map_id(&self) -> &'static str {
        match self {
            TextureChannel::Diffuse => "diffusemap",
            TextureChannel::Ambient => "ambientmap",
            TextureChannel::Bump => "bumpmap",
            TextureChannel::Specular => "specularmap",
            TextureChannel::Reflective => "reflectivemap",
            TextureChannel::Transparent => "transparentmap",
        }
    }

    /// Human-facing label for UI slots.
    pub fn label(&self) -> &'static str {
        match self {
            TextureChannel::Diffuse => "Diffuse",
            TextureChannel::Ambient => "Ambient",
            TextureChannel::Bump => "Bump",
            TextureChannel::Specular => "Specular",
            TextureChannel::Reflective => "Reflective",
            TextureChannel::Transparent => "Transparent",
        }
    }

    pub fn from_element_name(name: &str) -> Option<Self> {
        TextureChannel::ALL
            .into_iter()
            .find(|channel| channel.element_name() == name)
    }
}

impl fmt::Display for TextureChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.element_name())
    }
}

impl FromStr for TextureChannel {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        TextureChannel::from_element_name(&value.to_ascii_lowercase())
            .ok_or_else(|| format!("unknown texture channel: {value}"))
    }
}
