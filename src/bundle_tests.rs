//! Unit tests for bundle assembly.

use super::*;
use crate::checksum::{ChecksumAlgorithm, digest_file};
use rstest::{fixture, rstest};
use std::io::Read;
use tempfile::TempDir;

const POM: &str = concat!(
    "<project><groupId>org.example</groupId>",
    "<artifactId>foo</artifactId><version>1.0.0</version></project>"
);

#[fixture]
fn temp_dir() -> TempDir {
    TempDir::new().expect("temp dir creation succeeds")
}

/// Write a POM, a jar and a sources jar into `dir` and describe them.
fn sample_set(dir: &Path) -> ArtefactSet {
    let pom = dir.join("pom.xml");
    let jar = dir.join("foo-1.0.0.jar");
    let sources = dir.join("foo-1.0.0-sources.jar");
    fs::write(&pom, POM).expect("write pom");
    fs::write(&jar, b"jar bytes").expect("write jar");
    fs::write(&sources, b"source bytes").expect("write sources");
    ArtefactSet::new(Coordinate::new("org.example", "foo", "1.0.0"), pom)
        .with_file(ArtefactFile::new("jar", jar))
        .with_file(ArtefactFile::new("jar", sources).with_classifier("sources"))
}

fn scratch(temp_dir: &TempDir, name: &str) -> PathBuf {
    let dir = temp_dir.path().join(name);
    fs::create_dir_all(&dir).expect("mkdir scratch");
    dir
}

/// Read every entry of a zip archive as `(name, contents)` in archive order.
fn read_entries(path: &Path) -> Vec<(String, Vec<u8>)> {
    let file = fs::File::open(path).expect("open bundle");
    let mut archive = zip::ZipArchive::new(file).expect("read zip");
    (0..archive.len())
        .map(|index| {
            let mut entry = archive.by_index(index).expect("entry");
            let mut contents = Vec::new();
            entry.read_to_end(&mut contents).expect("read entry");
            (entry.name().to_owned(), contents)
        })
        .collect()
}

#[rstest]
fn bundle_is_named_after_coordinate(temp_dir: TempDir) {
    let set = sample_set(temp_dir.path());
    let out = scratch(&temp_dir, "out");
    let bundle = build_bundle(&set, &out).expect("bundle builds");
    assert_eq!(bundle, out.join("foo-1.0.0.zip"));
    assert!(bundle.is_file());
}

#[rstest]
fn entries_follow_repository_layout_in_order(temp_dir: TempDir) {
    let set = sample_set(temp_dir.path());
    let bundle = build_bundle(&set, &scratch(&temp_dir, "out")).expect("bundle builds");

    let names: Vec<String> = read_entries(&bundle).into_iter().map(|(name, _)| name).collect();
    let base = "org/example/foo/1.0.0/foo-1.0.0";
    let mut expected = Vec::new();
    for file in [".pom", ".jar", "-sources.jar"] {
        expected.push(format!("{base}{file}"));
        for ext in ["md5", "sha1", "sha256", "sha512"] {
            expected.push(format!("{base}{file}.{ext}"));
        }
    }
    assert_eq!(names, expected);
}

#[rstest]
fn artefact_bytes_are_copied_verbatim(temp_dir: TempDir) {
    let set = sample_set(temp_dir.path());
    let bundle = build_bundle(&set, &scratch(&temp_dir, "out")).expect("bundle builds");
    let entries = read_entries(&bundle);

    let jar = entries
        .iter()
        .find(|(name, _)| name == "org/example/foo/1.0.0/foo-1.0.0.jar")
        .expect("jar entry");
    assert_eq!(jar.1, b"jar bytes");
}

#[rstest]
fn sidecars_hold_hex_text_digests(temp_dir: TempDir) {
    let set = sample_set(temp_dir.path());
    let bundle = build_bundle(&set, &scratch(&temp_dir, "out")).expect("bundle builds");
    let entries = read_entries(&bundle);
    let jar_path = temp_dir.path().join("foo-1.0.0-sources.jar");

    for algorithm in ChecksumAlgorithm::ALL {
        let name = format!(
            "org/example/foo/1.0.0/foo-1.0.0-sources.jar.{}",
            algorithm.sidecar_extension()
        );
        let (_, contents) = entries
            .iter()
            .find(|(entry, _)| *entry == name)
            .unwrap_or_else(|| panic!("missing sidecar {name}"));
        let expected = digest_file(algorithm, &jar_path).expect("digest");
        assert_eq!(
            String::from_utf8(contents.clone()).expect("UTF-8 sidecar"),
            expected.as_str()
        );
    }
}

#[rstest]
fn repeated_builds_are_byte_identical(temp_dir: TempDir) {
    let set = sample_set(temp_dir.path());
    let first = build_bundle(&set, &scratch(&temp_dir, "first")).expect("first build");
    let second = build_bundle(&set, &scratch(&temp_dir, "second")).expect("second build");

    assert_eq!(read_entries(&first), read_entries(&second));
    assert_eq!(
        fs::read(&first).expect("read first"),
        fs::read(&second).expect("read second"),
        "identical input must produce identical archives"
    );
}

#[rstest]
fn rebuilding_replaces_existing_bundle(temp_dir: TempDir) {
    let set = sample_set(temp_dir.path());
    let out = scratch(&temp_dir, "out");
    fs::write(out.join("foo-1.0.0.zip"), b"stale").expect("write stale");

    let bundle = build_bundle(&set, &out).expect("bundle builds");
    assert_eq!(read_entries(&bundle).len(), 15);
}

#[rstest]
fn missing_artefact_fails_and_leaves_no_bundle(temp_dir: TempDir) {
    let set = sample_set(temp_dir.path())
        .with_file(ArtefactFile::new("jar", temp_dir.path().join("absent.jar")).with_classifier("javadoc"));
    let out = scratch(&temp_dir, "out");

    let err = build_bundle(&set, &out).expect_err("missing artefact must fail");
    assert!(matches!(err, BundleError::ReadArtefact { path, .. } if path.ends_with("absent.jar")));
    assert!(!out.join("foo-1.0.0.zip").exists(), "partial bundle must be removed");
}

#[rstest]
fn missing_scratch_dir_is_an_io_error(temp_dir: TempDir) {
    let set = sample_set(temp_dir.path());
    let err = build_bundle(&set, &temp_dir.path().join("nowhere")).expect_err("must fail");
    assert!(matches!(err, BundleError::Io(_)));
}
