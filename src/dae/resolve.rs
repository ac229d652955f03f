use std::path::{Path, PathBuf};

use xmltree::{Element, XMLNode};

use crate::dae::{channel::TextureChannel, document::DaeDocument, edit::FILE_URI_PREFIX};

/// One phong channel paired with the `library_images` entry it references.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkedTexture {
    pub channel: TextureChannel,
    pub image_id: String,
    /// Raw `init_from` text, `file://` prefix included.
    pub stored: String,
}

impl LinkedTexture {
    pub fn resolve(&self, model_dir: &Path, offset: &Path) -> PathBuf {
        resolve_texture_path(&self.stored, model_dir, offset)
    }
}

/// Pair every phong channel that carries a `<texture>` reference with the
/// image entry whose `id` matches the reference. Channels without a matching
/// image (and images nothing references) are skipped.
pub fn linked_textures(doc: &DaeDocument) -> Vec<LinkedTexture> {
    let Some(library) = doc.root().get_child("library_images") else {
        return Vec::new();
    };
    let images: Vec<(String, String)> = library
        .children
        .iter()
        .filter_map(XMLNode::as_element)
        .filter(|element| element.name == "image")
        .filter_map(|element| {
            let id = element.attributes.get("id")?.clone();
            let stored = element
                .get_child("init_from")
                .and_then(Element::get_text)?
                .into_owned();
            Some((id, stored))
        })
        .collect();

    let Some(phong) = find_phong(doc.root()) else {
        return Vec::new();
    };
    phong
        .children
        .iter()
        .filter_map(XMLNode::as_element)
        .filter_map(|slot| {
            let channel = TextureChannel::from_element_name(&slot.name)?;
            let reference = slot.get_child("texture")?;
            let id = reference.attributes.get("texture")?;
            let (image_id, stored) = images.iter().find(|(image_id, _)| image_id == id)?;
            Some(LinkedTexture {
                channel,
                image_id: image_id.clone(),
                stored: stored.clone(),
            })
        })
        .collect()
}

/// Resolve a stored `init_from` value to a filesystem path.
///
/// Relative paths are taken relative to the configured offset below the
/// model's directory (`../..` by default); this offset is a convention of the
/// originating asset pipeline, carried as configuration rather than logic.
pub fn resolve_texture_path(stored: &str, model_dir: &Path, offset: &Path) -> PathBuf {
    let trimmed = stored.strip_prefix(FILE_URI_PREFIX).unwrap_or(stored);
    let path = Path::new(trimmed);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        model_dir.join(offset).join(path)
    }
}

fn find_phong(root: &Element) -> Option<&Element> {
    let effects = root.get_child("library_effects")?;
    effects
        .children
        .iter()
        .filter_map(XMLNode::as_element)
        .filter(|element| element.name == "effect")
        .find_map(|effect| {
            effect
                .get_child("profile_COMMON")
                .and_then(|profile| profile.get_child("technique"))
                .and_then(|technique| technique.get_child("phong"))
        })
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    const LINKED: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<COLLADA xmlns="http://www.collada.org/2005/11/COLLADASchema" version="1.4.1">
  <asset/>
  <library_images>
    <image id="diffusemap"><init_from>file://textures/crate_diffuse.png</init_from></image>
    <image id="bumpmap"><init_from>file:///assets/textures/crate_bump.png</init_from></image>
    <image id="orphanmap"><init_from>file://textures/unused.png</init_from></image>
  </library_images>
  <library_effects>
    <effect id="crate-effect">
      <profile_COMMON>
        <technique sid="common">
          <phong>
            <diffuse><texture texture="diffusemap" texcoord="CHANNEL0"/></diffuse>
            <bump><texture texture="bumpmap" texcoord="CHANNEL0"/></bump>
            <specular><texture texture="missingmap" texcoord="CHANNEL0"/></specular>
            <shininess><float>20.0</float></shininess>
          </phong>
        </technique>
      </profile_COMMON>
    </effect>
  </library_effects>
</COLLADA>"#;

    fn load(contents: &str) -> DaeDocument {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("model.dae");
        fs::write(&path, contents).expect("write model");
        DaeDocument::load(&path).expect("load model")
    }

    #[test]
    fn pairs_channels_with_matching_image_entries() {
        let doc = load(LINKED);
        let linked = linked_textures(&doc);

        assert_eq!(linked.len(), 2, "orphan images and dangling references are skipped");
        assert_eq!(linked[0].channel, TextureChannel::Diffuse);
        assert_eq!(linked[0].image_id, "diffusemap");
        assert_eq!(linked[0].stored, "file://textures/crate_diffuse.png");
        assert_eq!(linked[1].channel, TextureChannel::Bump);
    }

    #[test]
    fn no_library_images_means_no_pairs() {
        let doc = load(
            r#"<COLLADA xmlns="http://www.collada.org/2005/11/COLLADASchema"><asset/></COLLADA>"#,
        );
        assert!(linked_textures(&doc).is_empty());
    }

    #[test]
    fn relative_paths_resolve_below_the_pipeline_offset() {
        let resolved = resolve_texture_path(
            "file://textures/crate_diffuse.png",
            Path::new("/projects/game/export/models"),
            Path::new("../.."),
        );
        assert_eq!(
            resolved,
            Path::new("/projects/game/export/models/../../textures/crate_diffuse.png")
        );
    }

    #[test]
    fn absolute_paths_pass_through() {
        let resolved = resolve_texture_path(
            "file:///assets/textures/crate_bump.png",
            Path::new("/projects/game/export/models"),
            Path::new("../.."),
        );
        assert_eq!(resolved, Path::new("/assets/textures/crate_bump.png"));
    }

    #[test]
    fn values_without_the_prefix_still_resolve() {
        let resolved = resolve_texture_path(
            "textures/crate_diffuse.png",
            Path::new("/models"),
            Path::new(".."),
        );
        assert_eq!(resolved, Path::new("/models/../textures/crate_diffuse.png"));
    }
}
