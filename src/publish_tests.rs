//! Unit tests for pipeline orchestration.

use super::*;
use crate::artefact::{ArtefactFile, Coordinate};
use crate::upload::MockUploader;
use rstest::{fixture, rstest};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const POM: &str = concat!(
    "<project><groupId>org.example</groupId>",
    "<artifactId>foo</artifactId><version>1.0.0</version></project>"
);

/// A project directory with a POM, a jar, and an `out` scratch directory.
struct Workspace {
    dir: TempDir,
}

impl Workspace {
    fn scratch(&self) -> PathBuf {
        self.dir.path().join("out")
    }

    fn request(&self, artefacts: ArtefactSet) -> PublishRequest {
        PublishRequest {
            artefacts,
            credentials: Credentials::new("user", "token"),
            publishing_type: PublishingType::Automatic,
            scratch_dir: self.scratch(),
        }
    }

    fn set(&self, version: &str) -> ArtefactSet {
        let root = self.dir.path();
        ArtefactSet::new(
            Coordinate::new("org.example", "foo", version),
            root.join("pom.xml"),
        )
        .with_name("mavenJava")
        .with_file(ArtefactFile::new("jar", root.join("foo-1.0.0.jar")))
    }
}

#[fixture]
fn workspace() -> Workspace {
    let dir = TempDir::new().expect("temp dir creation succeeds");
    fs::write(dir.path().join("pom.xml"), POM).expect("write pom");
    fs::write(dir.path().join("foo-1.0.0.jar"), b"jar bytes").expect("write jar");
    fs::create_dir(dir.path().join("out")).expect("mkdir out");
    Workspace { dir }
}

fn never_uploads() -> MockUploader {
    let mut uploader = MockUploader::new();
    uploader.expect_upload().never();
    uploader
}

#[rstest]
fn successful_run_returns_portal_id(workspace: Workspace) {
    let request = workspace.request(workspace.set("1.0.0"));
    let expected_bundle = workspace.scratch().join("foo-1.0.0.zip");

    let mut uploader = MockUploader::new();
    uploader
        .expect_upload()
        .withf(
            move |bundle: &Path, credentials: &Credentials, publishing_type: &PublishingType| {
                bundle == expected_bundle
                    && bundle.is_file()
                    && credentials.username() == "user"
                    && *publishing_type == PublishingType::Automatic
            },
        )
        .times(1)
        .returning(|_, _, _| Ok(UploadId::new("abc123")));

    let id = publish_with(&request, &uploader).expect("publish succeeds");
    assert_eq!(id.as_str(), "abc123");
}

#[rstest]
#[case::username(Credentials::new("", "token"), "credentials.username")]
#[case::password(Credentials::new("user", ""), "credentials.password")]
fn empty_credentials_are_missing_properties(
    workspace: Workspace,
    #[case] credentials: Credentials,
    #[case] expected: &str,
) {
    let mut request = workspace.request(workspace.set("1.0.0"));
    request.credentials = credentials;

    let err = publish_with(&request, &never_uploads()).expect_err("must fail");
    assert!(matches!(err, PublishError::MissingProperty { property, .. } if property == expected));
    assert_eq!(err.phase(), PublishPhase::Precondition);
    assert!(err.to_string().contains("mavenJava"));
}

#[rstest]
fn set_without_files_is_empty(workspace: Workspace) {
    let set = ArtefactSet::new(
        Coordinate::new("org.example", "foo", "1.0.0"),
        workspace.dir.path().join("pom.xml"),
    );
    let err = publish_with(&workspace.request(set), &never_uploads()).expect_err("must fail");
    assert!(matches!(err, PublishError::EmptyArtefactSet { .. }));
}

#[rstest]
fn absent_scratch_dir_is_reported(workspace: Workspace) {
    let mut request = workspace.request(workspace.set("1.0.0"));
    request.scratch_dir = workspace.dir.path().join("missing");

    let err = publish_with(&request, &never_uploads()).expect_err("must fail");
    assert!(matches!(err, PublishError::ScratchDirUnavailable { .. }));
    assert_eq!(err.publication(), "mavenJava");
}

#[rstest]
fn scratch_path_that_is_a_file_is_reported(workspace: Workspace) {
    let mut request = workspace.request(workspace.set("1.0.0"));
    request.scratch_dir = workspace.dir.path().join("pom.xml");

    let err = publish_with(&request, &never_uploads()).expect_err("must fail");
    assert!(matches!(err, PublishError::ScratchDirUnavailable { .. }));
}

#[rstest]
fn snapshot_fails_validation_without_writing_a_bundle(workspace: Workspace) {
    let request = workspace.request(workspace.set("1.0.0-SNAPSHOT"));

    let err = publish_with(&request, &never_uploads()).expect_err("must fail");
    assert_eq!(err.phase(), PublishPhase::Validation);
    assert!(matches!(
        &err,
        PublishError::Validation {
            source: ValidationError::SnapshotVersion { .. },
            ..
        }
    ));
    let entries = fs::read_dir(workspace.scratch()).expect("read scratch").count();
    assert_eq!(entries, 0, "no archive may be written");
}

#[rstest]
fn bundle_failures_report_the_build_phase(workspace: Workspace) {
    let set = workspace.set("1.0.0");
    let request = workspace.request(set);
    // Validation passes, then the jar disappears before it is bundled.
    validate(&request.artefacts).expect("valid before removal");
    fs::remove_file(workspace.dir.path().join("foo-1.0.0.jar")).expect("remove jar");

    let err = build_bundle(&request.artefacts, &request.scratch_dir).expect_err("must fail");
    let wrapped = PublishError::Build {
        name: request.artefacts.name().to_owned(),
        source: err,
    };
    assert_eq!(wrapped.phase(), PublishPhase::Build);
}

#[rstest]
fn upload_failure_keeps_the_cause(workspace: Workspace) {
    let request = workspace.request(workspace.set("1.0.0"));
    let mut uploader = MockUploader::new();
    uploader.expect_upload().times(1).returning(|_, _, _| {
        Err(UploadError::Rejected {
            status: 400,
            reason: "Bad Request".to_owned(),
            body: r#"{"error":"bad request"}"#.to_owned(),
        })
    });

    let err = publish_with(&request, &uploader).expect_err("must fail");
    assert_eq!(err.phase(), PublishPhase::Upload);
    let source = std::error::Error::source(&err).expect("upload error is chained");
    assert!(source.to_string().contains("400"));
}

#[test]
fn phases_display_lowercase() {
    assert_eq!(PublishPhase::Precondition.to_string(), "precondition");
    assert_eq!(PublishPhase::Upload.to_string(), "upload");
}

#[rstest]
fn stage_builds_the_bundle_without_credentials(workspace: Workspace) {
    let set = workspace.set("1.0.0");
    let bundle = stage(&set, &workspace.scratch()).expect("stage succeeds");
    assert_eq!(bundle, workspace.scratch().join("foo-1.0.0.zip"));
    assert!(bundle.is_file());
}

#[rstest]
fn preconditions_check_credentials_before_artefacts(workspace: Workspace) {
    let set = ArtefactSet::new(
        Coordinate::new("org.example", "foo", "1.0.0"),
        workspace.dir.path().join("pom.xml"),
    );
    let mut request = workspace.request(set);
    request.credentials = Credentials::new("", "");

    let err = check_preconditions(&request).expect_err("must fail");
    assert!(matches!(
        err,
        PublishError::MissingProperty {
            property: "credentials.username",
            ..
        }
    ));
}

#[rstest]
fn publish_fails_exactly_where_preconditions_fail(workspace: Workspace) {
    let mut request = workspace.request(workspace.set("1.0.0"));
    request.scratch_dir = workspace.dir.path().join("absent");

    let expected = check_preconditions(&request).expect_err("must fail");
    let err = publish_with(&request, &never_uploads()).expect_err("must fail");
    assert_eq!(err.to_string(), expected.to_string());
    assert_eq!(err.phase(), PublishPhase::Precondition);
}
