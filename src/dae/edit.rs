use std::{fmt, path::Path};

use tracing::info;
use xmltree::{Element, XMLNode};

use crate::dae::{channel::TextureChannel, document::DaeDocument};

/// Prefix stored in front of every `init_from` path.
pub const FILE_URI_PREFIX: &str = "file://";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindAction {
    /// The channel element did not exist and was created with the full
    /// boilerplate subtree.
    Inserted,
    /// The channel element existed; its texture reference was rewritten.
    Replaced,
}

/// Outcome of a successful bind. Warnings cover the image-linking branch,
/// which degrades instead of failing the whole operation.
#[derive(Debug)]
pub struct BindReport {
    pub channel: TextureChannel,
    pub action: BindAction,
    pub image_id: String,
    pub warnings: Vec<String>,
}

#[derive(Debug, PartialEq, Eq)]
pub enum BindError {
    MissingEffects,
    MissingPhong,
}

impl fmt::Display for BindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BindError::MissingEffects => {
                write!(f, "document has no <library_effects>; nothing to bind to")
            }
            BindError::MissingPhong => {
                write!(
                    f,
                    "no <phong> material under library_effects/effect/profile_COMMON/technique"
                )
            }
        }
    }
}

impl std::error::Error for BindError {}

/// Attach or replace one texture channel of the document's phong material.
///
/// The phong channel element and the paired `library_images` entry are kept
/// in lockstep: after a successful bind there is exactly one image whose id
/// equals the channel's map id. The document is only mutated in memory; the
/// caller decides when to save.
pub fn bind_texture(
    doc: &mut DaeDocument,
    channel: TextureChannel,
    texture: &Path,
) -> Result<BindReport, BindError> {
    let ns = doc.namespace().map(str::to_string);
    let mut warnings = Vec::new();

    if doc.root().get_child("library_effects").is_none() {
        return Err(BindError::MissingEffects);
    }

    let action = {
        let phong = find_phong_mut(doc.root_mut()).ok_or(BindError::MissingPhong)?;
        apply_channel(phong, channel, ns.as_ref(), &mut warnings)
    };

    let uri = texture_uri(texture, &mut warnings);
    upsert_image(doc.root_mut(), ns.as_ref(), channel.map_id(), &uri, &mut warnings);

    match action {
        BindAction::Inserted => info!("added {channel} binding in {}", doc.path().display()),
        BindAction::Replaced => info!("replaced {channel} binding in {}", doc.path().display()),
    }

    Ok(BindReport {
        channel,
        action,
        image_id: channel.map_id().to_string(),
        warnings,
    })
}

/// First phong element reachable through the fixed
/// `library_effects/effect/profile_COMMON/technique` path.
fn find_phong_mut(root: &mut Element) -> Option<&mut Element> {
    let effects = root.get_mut_child("library_effects")?;
    effects
        .children
        .iter_mut()
        .filter_map(XMLNode::as_mut_element)
        .filter(|element| element.name == "effect")
        .find_map(|effect| {
            effect
                .get_mut_child("profile_COMMON")
                .and_then(|profile| profile.get_mut_child("technique"))
                .and_then(|technique| technique.get_mut_child("phong"))
        })
}

fn apply_channel(
    phong: &mut Element,
    channel: TextureChannel,
    ns: Option<&String>,
    warnings: &mut Vec<String>,
) -> BindAction {
    if let Some(existing) = phong.get_mut_child(channel.element_name()) {
        match existing.get_mut_child("texture") {
            Some(reference) => {
                reference
                    .attributes
                    .insert("texture".to_string(), channel.map_id().to_string());
            }
            None => {
                warnings.push(format!(
                    "<{}> had no <texture> child; rebuilt it",
                    channel.element_name()
                ));
                existing
                    .children
                    .push(XMLNode::Element(texture_reference(channel, ns)));
            }
        }
        return BindAction::Replaced;
    }

    let mut slot = new_element(channel.element_name(), ns);
    slot.children
        .push(XMLNode::Element(texture_reference(channel, ns)));
    phong.children.push(XMLNode::Element(slot));
    BindAction::Inserted
}

/// `<texture>` reference plus the fixed MAYA profile block the consuming
/// tool expects on freshly created channels.
fn texture_reference(channel: TextureChannel, ns: Option<&String>) -> Element {
    let mut texture = new_element("texture", ns);
    texture
        .attributes
        .insert("texture".to_string(), channel.map_id().to_string());
    texture
        .attributes
        .insert("texcoord".to_string(), "CHANNEL0".to_string());

    let mut warp_u = text_element("warpU", ns, "TRUE");
    warp_u
        .attributes
        .insert("sid".to_string(), "warpU0".to_string());
    let mut warp_v = text_element("warpV", ns, "TRUE");
    warp_v
        .attributes
        .insert("sid".to_string(), "warpV0".to_string());
    let blend_mode = text_element("blend_mode", ns, "ADD");

    let mut technique = new_element("technique", ns);
    technique
        .attributes
        .insert("profile".to_string(), "MAYA".to_string());
    technique.children.extend([
        XMLNode::Element(warp_u),
        XMLNode::Element(warp_v),
        XMLNode::Element(blend_mode),
    ]);

    let mut extra = new_element("extra", ns);
    extra.children.push(XMLNode::Element(technique));
    texture.children.push(XMLNode::Element(extra));
    texture
}

fn upsert_image(
    root: &mut Element,
    ns: Option<&String>,
    map_id: &str,
    uri: &str,
    warnings: &mut Vec<String>,
) {
    if let Some(library) = root.get_mut_child("library_images") {
        let existing = library
            .children
            .iter_mut()
            .filter_map(XMLNode::as_mut_element)
            .filter(|element| element.name == "image")
            .find(|element| element.attributes.get("id").map(String::as_str) == Some(map_id));
        if let Some(image) = existing {
            set_init_from(image, ns, uri);
            return;
        }

        // Clone an existing entry so extra attributes and children keep the
        // shape the exporter produced.
        let template = library
            .children
            .iter()
            .filter_map(XMLNode::as_element)
            .find(|element| element.name == "image")
            .cloned();
        let mut image = match template {
            Some(image) => image,
            None => {
                warnings.push(
                    "<library_images> had no image entry to use as a template".to_string(),
                );
                new_element("image", ns)
            }
        };
        image.attributes.insert("id".to_string(), map_id.to_string());
        set_init_from(&mut image, ns, uri);
        library.children.push(XMLNode::Element(image));
        return;
    }

    // No <library_images> at all; create it after <asset> so the document
    // keeps the usual COLLADA ordering.
    warnings.push("document had no <library_images>; created one".to_string());
    let mut image = new_element("image", ns);
    image.attributes.insert("id".to_string(), map_id.to_string());
    set_init_from(&mut image, ns, uri);
    let mut library = new_element("library_images", ns);
    library.children.push(XMLNode::Element(image));

    let anchor = root
        .children
        .iter()
        .position(|node| node.as_element().is_some_and(|element| element.name == "asset"));
    let index = anchor.map(|position| position + 1).unwrap_or(0);
    root.children.insert(index, XMLNode::Element(library));
}

fn set_init_from(image: &mut Element, ns: Option<&String>, uri: &str) {
    match image.get_mut_child("init_from") {
        Some(init_from) => {
            init_from.children.clear();
            init_from.children.push(XMLNode::Text(uri.to_string()));
        }
        None => {
            image
                .children
                .push(XMLNode::Element(text_element("init_from", ns, uri)));
        }
    }
}

fn texture_uri(texture: &Path, warnings: &mut Vec<String>) -> String {
    let absolute = match std::path::absolute(texture) {
        Ok(path) => path,
        Err(_) => {
            warnings.push(format!(
                "could not absolutize {}; storing it as given",
                texture.display()
            ));
            texture.to_path_buf()
        }
    };
    format!("{FILE_URI_PREFIX}{}", absolute.display())
}

fn new_element(name: &str, ns: Option<&String>) -> Element {
    let mut element = Element::new(name);
    element.namespace = ns.cloned();
    element
}

fn text_element(name: &str, ns: Option<&String>, text: &str) -> Element {
    let mut element = new_element(name, ns);
    element.children.push(XMLNode::Text(text.to_string()));
    element
}
