//! Add-pod workflow against recording stubs.
//!
//! The fetcher and the mirror share one call log so tests can assert the
//! total order of pull / fetch / stage / commit / push.

use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use minipod_core::{MirrorConfig, MirrorLayout, PodIdentity, RepoName};
use minipod_sync::{
    add_pod, check_repo, AddError, AddEvent, FetchOutcome, MirrorError, MirrorOp,
    MirrorRepository, SpecFetcher,
};
use rstest::rstest;
use tempfile::TempDir;

// ---------------------------------------------------------------------------
// Stubs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
enum Call {
    Pull,
    Fetch(String),
    /// Whether the spec file was already on disk when staging began.
    StageAll { spec_present: bool },
    Commit(String),
    Push,
}

type Log = Rc<RefCell<Vec<Call>>>;

struct StubFetcher {
    log: Log,
    outcome: FetchOutcome,
}

impl SpecFetcher for StubFetcher {
    fn fetch(&self, url: &str) -> FetchOutcome {
        self.log.borrow_mut().push(Call::Fetch(url.to_owned()));
        self.outcome.clone()
    }
}

struct StubMirror {
    log: Log,
    spec_file: PathBuf,
    fail_on: Option<MirrorOp>,
}

impl StubMirror {
    fn step(&self, op: MirrorOp, call: Call) -> Result<(), MirrorError> {
        self.log.borrow_mut().push(call);
        if self.fail_on == Some(op) {
            return Err(MirrorError::Spawn {
                op,
                dir: PathBuf::from("/stub"),
                source: std::io::Error::other("stub failure"),
            });
        }
        Ok(())
    }
}

impl MirrorRepository for StubMirror {
    fn pull(&self) -> Result<(), MirrorError> {
        self.step(MirrorOp::Pull, Call::Pull)
    }

    fn stage_all(&self) -> Result<(), MirrorError> {
        let spec_present = self.spec_file.exists();
        self.step(MirrorOp::StageAll, Call::StageAll { spec_present })
    }

    fn commit(&self, message: &str) -> Result<(), MirrorError> {
        self.step(MirrorOp::Commit, Call::Commit(message.to_owned()))
    }

    fn push(&self) -> Result<(), MirrorError> {
        self.step(MirrorOp::Push, Call::Push)
    }
}

// ---------------------------------------------------------------------------
// Fixture
// ---------------------------------------------------------------------------

struct Fixture {
    _home: TempDir,
    layout: MirrorLayout,
    repo: RepoName,
    pod: PodIdentity,
    log: Log,
}

impl Fixture {
    fn new() -> Self {
        let home = TempDir::new().expect("home");
        let layout = MirrorLayout::new(MirrorConfig::for_home(home.path()));
        let repo = RepoName::from("private");
        fs::create_dir_all(layout.repo_dir(&repo)).expect("mkdir repo");
        Self {
            _home: home,
            layout,
            repo,
            pod: PodIdentity::new("Foo", "1.0"),
            log: Rc::new(RefCell::new(Vec::new())),
        }
    }

    fn spec_file(&self) -> PathBuf {
        self.layout.local_spec_file_path(&self.repo, &self.pod)
    }

    fn url(&self) -> String {
        self.layout.upstream_url(&self.pod)
    }

    fn run(
        &self,
        outcome: FetchOutcome,
        fail_on: Option<MirrorOp>,
    ) -> (Result<PathBuf, AddError>, Vec<AddEvent>) {
        let fetcher = StubFetcher {
            log: self.log.clone(),
            outcome,
        };
        let mirror = StubMirror {
            log: self.log.clone(),
            spec_file: self.spec_file(),
            fail_on,
        };
        let mut events = Vec::new();
        let result = add_pod(
            &self.layout,
            &self.repo,
            &self.pod,
            &fetcher,
            &mirror,
            &mut events,
        );
        (result, events)
    }

    fn calls(&self) -> Vec<Call> {
        self.log.borrow().clone()
    }
}

fn has_publish_calls(calls: &[Call]) -> bool {
    calls.iter().any(|c| {
        matches!(
            c,
            Call::StageAll { .. } | Call::Commit(_) | Call::Push
        )
    })
}

fn dir_is_empty(dir: &Path) -> bool {
    fs::read_dir(dir).map(|mut d| d.next().is_none()).unwrap_or(true)
}

// ---------------------------------------------------------------------------
// Happy path
// ---------------------------------------------------------------------------

#[test]
fn happy_path_writes_bytes_then_publishes_in_order() {
    let fx = Fixture::new();
    let body = br#"{"name":"Foo","version":"1.0"}"#.to_vec();

    let (result, events) = fx.run(FetchOutcome::Success(body.clone()), None);

    let written = result.expect("add should succeed");
    assert_eq!(written, fx.spec_file());
    assert_eq!(fs::read(fx.spec_file()).unwrap(), body);
    assert_eq!(
        fx.calls(),
        vec![
            Call::Pull,
            Call::Fetch(fx.url()),
            Call::StageAll { spec_present: true },
            Call::Commit("add Foo[1.0]".to_owned()),
            Call::Push,
        ]
    );
    assert_eq!(
        events,
        vec![
            AddEvent::DownloadSuccess(fx.pod.clone()),
            AddEvent::InstallSuccess(fx.pod.clone()),
        ]
    );
}

#[test]
fn existing_spec_is_overwritten() {
    let fx = Fixture::new();
    fs::create_dir_all(fx.spec_file().parent().unwrap()).unwrap();
    fs::write(fx.spec_file(), "stale").unwrap();

    let (result, _) = fx.run(FetchOutcome::Success(b"fresh".to_vec()), None);

    result.expect("add should succeed");
    assert_eq!(fs::read_to_string(fx.spec_file()).unwrap(), "fresh");
}

// ---------------------------------------------------------------------------
// Fetch short-circuits
// ---------------------------------------------------------------------------

#[test]
fn not_found_stops_before_write_and_publish() {
    let fx = Fixture::new();

    let (result, events) = fx.run(FetchOutcome::NotFound, None);

    assert!(matches!(result, Err(AddError::NotFound { .. })));
    assert!(!fx.spec_file().exists(), "no spec file on 404");
    assert!(!has_publish_calls(&fx.calls()));
    assert_eq!(events, vec![AddEvent::NotExists(fx.pod.clone())]);
    assert_eq!(events[0].to_string(), "pod Foo[1.0] not exists!");
}

#[rstest]
#[case("HTTP 500 Internal Server Error")]
#[case("HTTP 403 Forbidden")]
#[case("connection refused")]
fn transfer_error_stops_before_write_and_publish(#[case] reason: &str) {
    let fx = Fixture::new();

    let (result, events) = fx.run(FetchOutcome::TransferError(reason.to_owned()), None);

    match result {
        Err(AddError::Transfer { reason: r, url, .. }) => {
            assert_eq!(r, reason);
            assert_eq!(url, fx.url());
        }
        other => panic!("expected Transfer error, got {other:?}"),
    }
    assert!(!fx.spec_file().exists(), "no spec file on transfer error");
    assert!(!has_publish_calls(&fx.calls()));
    assert_eq!(events, vec![AddEvent::DownloadFailure(fx.pod.clone())]);
}

#[test]
fn spec_dir_is_created_even_when_fetch_fails() {
    let fx = Fixture::new();

    let _ = fx.run(FetchOutcome::NotFound, None);

    let dir = fx.layout.local_spec_dir_path(&fx.repo, &fx.pod);
    assert!(dir.is_dir());
    assert!(dir_is_empty(&dir));
}

// ---------------------------------------------------------------------------
// Mirror failures
// ---------------------------------------------------------------------------

#[test]
fn pull_failure_stops_everything() {
    let fx = Fixture::new();

    let (result, events) = fx.run(FetchOutcome::Success(b"{}".to_vec()), Some(MirrorOp::Pull));

    assert!(matches!(result, Err(AddError::Pull { .. })));
    assert_eq!(fx.calls(), vec![Call::Pull]);
    assert!(events.is_empty());
    assert!(!fx.layout.local_spec_dir_path(&fx.repo, &fx.pod).exists());
}

#[rstest]
#[case(MirrorOp::StageAll, 3)]
#[case(MirrorOp::Commit, 4)]
#[case(MirrorOp::Push, 5)]
fn publish_failure_keeps_file_and_stops(#[case] failing: MirrorOp, #[case] calls_made: usize) {
    let fx = Fixture::new();

    let (result, events) = fx.run(FetchOutcome::Success(b"{}".to_vec()), Some(failing));

    match result {
        Err(AddError::Publish { path, source, .. }) => {
            assert_eq!(path, fx.spec_file());
            assert!(matches!(source, MirrorError::Spawn { op, .. } if op == failing));
        }
        other => panic!("expected Publish error, got {other:?}"),
    }
    assert_eq!(fx.calls().len(), calls_made);
    assert!(fx.spec_file().exists(), "no rollback on publish failure");
    assert_eq!(events, vec![AddEvent::DownloadSuccess(fx.pod.clone())]);
}

#[test]
fn spec_dir_blocked_by_file_aborts_before_fetch() {
    let fx = Fixture::new();
    let specs = fx.layout.repo_dir(&fx.repo).join("Specs");
    fs::write(&specs, "not a directory").unwrap();

    let (result, events) = fx.run(FetchOutcome::Success(b"{}".to_vec()), None);

    assert!(matches!(result, Err(AddError::CreateDir { .. })));
    assert_eq!(fx.calls(), vec![Call::Pull]);
    assert!(events.is_empty());
}

// ---------------------------------------------------------------------------
// Precondition
// ---------------------------------------------------------------------------

#[test]
fn check_repo_accepts_existing_mirror() {
    let fx = Fixture::new();
    let dir = check_repo(&fx.layout, &fx.repo).expect("repo exists");
    assert_eq!(dir, fx.layout.repo_dir(&fx.repo));
}

#[test]
fn check_repo_rejects_missing_mirror() {
    let fx = Fixture::new();
    let err = check_repo(&fx.layout, &RepoName::from("nope")).unwrap_err();
    assert!(matches!(err, AddError::RepoMissing { .. }));
    assert!(err.to_string().starts_with("repo[nope] not exist in "));
}
