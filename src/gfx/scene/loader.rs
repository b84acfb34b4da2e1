//! Asynchronous OBJ model loading.
//!
//! Decoding happens on a worker thread. The result travels back through a
//! oneshot channel that the frame loop polls, so insertion into the scene
//! always happens on the main thread between frames and never blocks
//! rendering. There is no retry and no timeout: a failed load is reported
//! once and the scene simply lacks the model.

use std::path::{Path, PathBuf};
use std::thread;

use futures::channel::oneshot;
use thiserror::Error;

use crate::gfx::{
    geometry::GeometryData,
    resources::material::Material,
    scene::object::{Mesh, Object},
};

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to decode '{path}': {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: tobj::LoadError,
    },
    #[error("'{0}' contains no geometry")]
    Empty(PathBuf),
    #[error("loader thread for '{0}' stopped before finishing")]
    Abandoned(PathBuf),
    #[error("could not start loader thread: {0}")]
    Spawn(#[from] std::io::Error),
}

/// Resolves model names to files under `<root>/models/<name>.obj`.
#[derive(Debug, Clone)]
pub struct ModelLoader {
    root: PathBuf,
}

impl ModelLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn resolve(&self, name: &str) -> PathBuf {
        self.root.join("models").join(format!("{name}.obj"))
    }

    /// Starts loading `name` in the background.
    pub fn request(&self, name: &str) -> PendingModel {
        let path = self.resolve(name);
        let (sender, receiver) = oneshot::channel();

        log::info!("loading model '{}' from {}", name, path.display());

        let worker_path = path.clone();
        let spawned = thread::Builder::new()
            .name(format!("load-{name}"))
            .spawn(move || {
                let result = load_obj(&worker_path);
                // The receiver is gone if the app already shut down.
                let _ = sender.send(result);
            });

        let state = match spawned {
            Ok(_) => PendingState::Waiting(receiver),
            Err(err) => PendingState::Failed(Some(LoadError::Spawn(err))),
        };

        PendingModel { path, state }
    }
}

enum PendingState {
    Waiting(oneshot::Receiver<Result<Object, LoadError>>),
    Failed(Option<LoadError>),
    Done,
}

/// A model load in flight.
pub struct PendingModel {
    path: PathBuf,
    state: PendingState,
}

impl PendingModel {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Non-blocking check for completion. Yields the outcome exactly once;
    /// afterwards always returns `None`.
    pub fn poll(&mut self) -> Option<Result<Object, LoadError>> {
        match &mut self.state {
            PendingState::Waiting(receiver) => match receiver.try_recv() {
                Ok(None) => None,
                Ok(Some(result)) => {
                    self.state = PendingState::Done;
                    Some(result)
                }
                Err(oneshot::Canceled) => {
                    self.state = PendingState::Done;
                    Some(Err(LoadError::Abandoned(self.path.clone())))
                }
            },
            PendingState::Failed(err) => {
                let err = err.take();
                self.state = PendingState::Done;
                err.map(Err)
            }
            PendingState::Done => None,
        }
    }

    pub fn is_done(&self) -> bool {
        matches!(self.state, PendingState::Done)
    }
}

/// Decodes an OBJ (and its MTL, if any) into a single object whose meshes are
/// the file's models. The first referenced material colours the whole object.
pub fn load_obj(path: &Path) -> Result<Object, LoadError> {
    let (models, materials) = tobj::load_obj(
        path,
        &tobj::LoadOptions {
            triangulate: true,
            single_index: true,
            ..Default::default()
        },
    )
    .map_err(|source| LoadError::Decode {
        path: path.to_path_buf(),
        source,
    })?;

    let materials = materials.unwrap_or_else(|err| {
        log::debug!("no materials for {}: {}", path.display(), err);
        Vec::new()
    });

    let meshes: Vec<Mesh> = models
        .iter()
        .filter(|m| !m.mesh.indices.is_empty())
        .map(|m| {
            Mesh::new(GeometryData::from_flat(
                &m.mesh.positions,
                &m.mesh.normals,
                m.mesh.indices.clone(),
            ))
        })
        .collect();

    if meshes.is_empty() {
        return Err(LoadError::Empty(path.to_path_buf()));
    }

    let material = models
        .iter()
        .find_map(|m| m.mesh.material_id)
        .and_then(|id| materials.get(id))
        .map(Material::from_mtl)
        .unwrap_or_else(|| Material::phong("Model", crate::gfx::color::Color::WHITE));

    let name = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "model".to_string());

    let object = Object::new(&name, meshes, material);
    log::info!(
        "decoded {} ({} meshes, {} triangles)",
        path.display(),
        object.meshes.len(),
        object.triangle_count()
    );
    Ok(object)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    fn wait(pending: &mut PendingModel) -> Result<Object, LoadError> {
        let deadline = Instant::now() + Duration::from_secs(10);
        loop {
            if let Some(result) = pending.poll() {
                return result;
            }
            assert!(Instant::now() < deadline, "load never completed");
            thread::sleep(Duration::from_millis(5));
        }
    }

    fn temp_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "glimpse-loader-{}-{}",
            tag,
            std::process::id()
        ));
        std::fs::create_dir_all(dir.join("models")).expect("create temp dir");
        dir
    }

    #[test]
    fn test_resolve_follows_path_pattern() {
        let loader = ModelLoader::new("/assets");
        assert_eq!(
            loader.resolve("duck"),
            PathBuf::from("/assets/models/duck.obj")
        );
    }

    #[test]
    fn test_missing_model_reports_once() {
        let loader = ModelLoader::new(temp_dir("missing"));
        let mut pending = loader.request("does-not-exist");

        let result = wait(&mut pending);
        assert!(matches!(result, Err(LoadError::Decode { .. })));
        assert!(pending.is_done());
        assert!(pending.poll().is_none());
    }

    #[test]
    fn test_loads_triangle_with_material() {
        let dir = temp_dir("triangle");
        std::fs::write(
            dir.join("models/tri.mtl"),
            "newmtl red\nKd 1.0 0.0 0.0\n",
        )
        .expect("write mtl");
        std::fs::write(
            dir.join("models/tri.obj"),
            "mtllib tri.mtl\no tri\nv 0 0 0\nv 1 0 0\nv 0 1 0\nusemtl red\nf 1 2 3\n",
        )
        .expect("write obj");

        let mut pending = ModelLoader::new(&dir).request("tri");
        let object = wait(&mut pending).expect("triangle loads");

        assert_eq!(object.name, "tri");
        assert_eq!(object.triangle_count(), 1);
        assert_eq!(object.material.color.r, 1.0);
        assert_eq!(object.material.color.g, 0.0);
        assert!((object.meshes[0].geometry.normals[0][2] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_file_without_faces_is_empty() {
        let dir = temp_dir("empty");
        std::fs::write(dir.join("models/points.obj"), "v 0 0 0\nv 1 0 0\n").expect("write obj");
        let result = load_obj(&dir.join("models/points.obj"));
        assert!(matches!(result, Err(LoadError::Empty(_))));
    }
}
