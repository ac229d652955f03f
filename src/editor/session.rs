use std::{
    fmt,
    path::{Path, PathBuf},
};

use tracing::info;

use crate::{
    dae::{
        BindError, BindReport, DaeDocument, DaeError, LinkedTexture, TextureChannel, bind_texture,
        linked_textures,
    },
    editor::{config::PipelineConfig, io::ConfigIoError},
};

pub const MODEL_EXTENSION: &str = "dae";
pub const TEXTURE_EXTENSIONS: [&str; 5] = ["jpg", "png", "psd", "tga", "bmp"];

/// Extension-only check for droppable model files; no content sniffing.
pub fn is_model_path(path: &Path) -> bool {
    has_extension(path, &[MODEL_EXTENSION])
}

/// Extension-only check for droppable texture files.
pub fn is_texture_path(path: &Path) -> bool {
    has_extension(path, &TEXTURE_EXTENSIONS)
}

fn has_extension(path: &Path, accepted: &[&str]) -> bool {
    path.extension()
        .and_then(|extension| extension.to_str())
        .is_some_and(|extension| {
            accepted
                .iter()
                .any(|candidate| extension.eq_ignore_ascii_case(candidate))
        })
}

/// A linked texture together with the filesystem path it resolves to.
#[derive(Debug, Clone)]
pub struct ResolvedTexture {
    pub linked: LinkedTexture,
    pub path: PathBuf,
}

/// One open model: the parsed document plus the pipeline config discovered
/// beside it. All edits run to completion and save before the next one is
/// accepted; there is no queuing or batching.
pub struct ModelSession {
    doc: DaeDocument,
    config: PipelineConfig,
}

impl ModelSession {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, SessionError> {
        let path = path.as_ref();
        if !is_model_path(path) {
            return Err(SessionError::NotAModel(path.to_path_buf()));
        }
        let doc = DaeDocument::load(path).map_err(SessionError::Document)?;
        let config = PipelineConfig::discover(doc.dir()).map_err(SessionError::Config)?;
        info!("opened session for {}", doc.path().display());
        Ok(Self { doc, config })
    }

    pub fn path(&self) -> &Path {
        self.doc.path()
    }

    pub fn document(&self) -> &DaeDocument {
        &self.doc
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn set_texture_root_offset(&mut self, offset: PathBuf) {
        self.config.texture_root_offset = offset;
    }

    /// Bind a texture to a channel and persist the document. One save per
    /// successful mutation; a failed bind leaves the file untouched.
    pub fn bind(
        &mut self,
        channel: TextureChannel,
        texture: &Path,
    ) -> Result<BindReport, SessionError> {
        if !is_texture_path(texture) {
            return Err(SessionError::NotATexture(texture.to_path_buf()));
        }
        let report = bind_texture(&mut self.doc, channel, texture).map_err(SessionError::Bind)?;
        self.doc.save().map_err(SessionError::Document)?;
        Ok(report)
    }

    /// Re-read the document from disk, discarding in-memory state.
    pub fn reload(&mut self) -> Result<(), SessionError> {
        self.doc = DaeDocument::load(self.doc.path()).map_err(SessionError::Document)?;
        Ok(())
    }

    /// Channel/image pairs with stored paths resolved to the filesystem.
    pub fn resolved_textures(&self) -> Vec<ResolvedTexture> {
        linked_textures(&self.doc)
            .into_iter()
            .map(|linked| {
                let path = linked.resolve(self.doc.dir(), self.config.offset());
                ResolvedTexture { linked, path }
            })
            .collect()
    }
}

#[derive(Debug)]
pub enum SessionError {
    NotAModel(PathBuf),
    NotATexture(PathBuf),
    Document(DaeError),
    Config(ConfigIoError),
    Bind(BindError),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::NotAModel(path) => {
                write!(f, "not a .dae model: {}", path.display())
            }
            SessionError::NotATexture(path) => {
                write!(
                    f,
                    "not a supported texture ({}): {}",
                    TEXTURE_EXTENSIONS.join("/"),
                    path.display()
                )
            }
            SessionError::Document(err) => write!(f, "{err}"),
            SessionError::Config(err) => write!(f, "pipeline config: {err}"),
            SessionError::Bind(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SessionError::NotAModel(_) | SessionError::NotATexture(_) => None,
            SessionError::Document(err) => Some(err),
            SessionError::Config(err) => Some(err),
            SessionError::Bind(err) => Some(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use crate::editor::config::CONFIG_FILE_NAME;

    use super::*;

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<COLLADA xmlns="http://www.collada.org/2005/11/COLLADASchema" version="1.4.1">
  <asset/>
  <library_images>
    <image id="diffusemap"><init_from>file://textures/crate_diffuse.png</init_from></image>
  </library_images>
  <library_effects>
    <effect id="crate-effect">
      <profile_COMMON>
        <technique sid="common">
          <phong>
            <diffuse><texture texture="diffusemap" texcoord="CHANNEL0"/></diffuse>
          </phong>
        </technique>
      </profile_COMMON>
    </effect>
  </library_effects>
</COLLADA>"#;

    fn write_sample(dir: &tempfile::TempDir) -> PathBuf {
        let path = dir.path().join("model.dae");
        fs::write(&path, SAMPLE).expect("write model");
        path
    }

    #[test]
    fn extension_checks_are_case_insensitive() {
        assert!(is_model_path(Path::new("scene.DAE")));
        assert!(!is_model_path(Path::new("scene.obj")));
        assert!(!is_model_path(Path::new("dae")));
        assert!(is_texture_path(Path::new("crate.PNG")));
        assert!(is_texture_path(Path::new("crate.tga")));
        assert!(!is_texture_path(Path::new("crate.gif")));
    }

    #[test]
    fn open_rejects_non_dae_paths() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("model.obj");
        fs::write(&path, SAMPLE).expect("write file");
        assert!(matches!(
            ModelSession::open(&path),
            Err(SessionError::NotAModel(_))
        ));
    }

    #[test]
    fn bind_rejects_unsupported_texture_and_leaves_file_alone() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write_sample(&dir);
        let before = fs::read_to_string(&path).expect("read model");

        let mut session = ModelSession::open(&path).expect("open");
        let result = session.bind(TextureChannel::Bump, &dir.path().join("notes.txt"));
        assert!(matches!(result, Err(SessionError::NotATexture(_))));

        let after = fs::read_to_string(&path).expect("read model");
        assert_eq!(before, after);
    }

    #[test]
    fn bind_saves_to_disk() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write_sample(&dir);

        let mut session = ModelSession::open(&path).expect("open");
        let report = session
            .bind(TextureChannel::Bump, &dir.path().join("crate_bump.png"))
            .expect("bind");
        assert_eq!(report.image_id, "bumpmap");

        let reloaded = ModelSession::open(&path).expect("reopen");
        assert!(
            reloaded
                .resolved_textures()
                .iter()
                .any(|resolved| resolved.linked.channel == TextureChannel::Bump)
        );
    }

    #[test]
    fn resolved_textures_honor_configured_offset() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write_sample(&dir);
        fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            r#"{ "texture_root_offset": "assets" }"#,
        )
        .expect("write config");

        let session = ModelSession::open(&path).expect("open");
        let resolved = session.resolved_textures();
        assert_eq!(resolved.len(), 1);
        assert_eq!(
            resolved[0].path,
            dir.path().join("assets").join("textures/crate_diffuse.png")
        );
    }
}
