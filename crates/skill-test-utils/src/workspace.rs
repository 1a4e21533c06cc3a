//! [`TestWorkspace`] builder for reconciliation scenarios.

use std::fs;
use std::path::{Path, PathBuf};

use skill_fs::{ConfigStore, MirrorRoot};
use skill_meta::{IndexFile, SkillMeta, Source, SourcesFile};
use tempfile::TempDir;

/// A temporary working directory holding the sources declaration, the index,
/// the mirror folder (`skill/`) and the scratch clone folder (`sources/`).
///
/// # Example
///
/// ```rust,no_run
/// use skill_meta::Source;
/// use skill_test_utils::TestWorkspace;
///
/// let ws = TestWorkspace::new();
/// ws.write_sources(&[Source::new("https://example.com/acme/skills")]);
/// ws.assert_no_skill("foo");
/// ```
pub struct TestWorkspace {
    temp_dir: TempDir,
}

impl Default for TestWorkspace {
    fn default() -> Self {
        Self::new()
    }
}

impl TestWorkspace {
    pub const MIRROR: &'static str = "skill";

    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn sources_path(&self) -> PathBuf {
        self.root().join("sources.skill.json")
    }

    pub fn index_path(&self) -> PathBuf {
        self.root().join("index.skill.json")
    }

    pub fn sources_dir(&self) -> PathBuf {
        self.root().join("sources")
    }

    pub fn mirror_root(&self) -> MirrorRoot {
        MirrorRoot::new(self.root(), Self::MIRROR).unwrap()
    }

    pub fn skill_dir(&self, name: &str) -> PathBuf {
        self.root().join(Self::MIRROR).join(name)
    }

    /// A directory for hand-built source trees, e.g. `upstream/<name>`.
    pub fn upstream_dir(&self, name: &str) -> PathBuf {
        let dir = self.root().join("upstream").join(name);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    pub fn sources(&self, sources: &[Source]) -> SourcesFile {
        SourcesFile {
            schema: Some("./schemas/sources.schema.json".to_string()),
            sources: sources.to_vec(),
        }
    }

    pub fn write_sources(&self, sources: &[Source]) {
        ConfigStore::new()
            .save(&self.sources_path(), &self.sources(sources))
            .unwrap();
    }

    pub fn write_index(&self, index: &IndexFile) {
        index.save(&self.index_path()).unwrap();
    }

    pub fn read_index(&self) -> IndexFile {
        IndexFile::load_or_default(&self.index_path()).unwrap()
    }

    pub fn read_index_raw(&self) -> String {
        fs::read_to_string(self.index_path()).unwrap()
    }

    pub fn read_sidecar(&self, name: &str) -> SkillMeta {
        SkillMeta::load(&self.skill_dir(name)).unwrap()
    }

    pub fn assert_skill_file(&self, name: &str, rel: &str) {
        let path = self.skill_dir(name).join(rel);
        assert!(path.is_file(), "Expected mirrored file: {}", path.display());
    }

    pub fn assert_no_skill(&self, name: &str) {
        let path = self.skill_dir(name);
        assert!(!path.exists(), "Expected no mirrored skill at {}", path.display());
    }
}
