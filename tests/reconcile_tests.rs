//! Reconciliation through the real client and a scripted tool

mod common;

use common::{client, firefox_info, ScriptedRunner};
use rustle_cask::runner::ExecutionOutcome;
use rustle_cask::{Action, CaskError, CurrentState, PackageResource, PresenceSpec, Reconciler};

const NOT_INSTALLED: &str = "vlc: 3.0.16\nhttps://www.videolan.org/vlc/\nNot installed\n";

#[tokio::test]
async fn test_current_state() {
    let reconciler = Reconciler::new(client(
        ScriptedRunner::new()
            .on_success(&["cask", "info", "firefox"], &firefox_info("89.0.2"))
            .on_success(&["cask", "info", "vlc"], NOT_INSTALLED),
    ));

    assert_eq!(
        reconciler.current_state("firefox").await.unwrap(),
        CurrentState::Installed {
            version: Some("89.0.2".to_string())
        }
    );
    assert_eq!(
        reconciler.current_state("vlc").await.unwrap(),
        CurrentState::NotInstalled
    );
}

#[tokio::test]
async fn test_already_present_runs_no_install() {
    let reconciler = Reconciler::new(client(
        ScriptedRunner::new().on_success(&["cask", "info", "firefox"], &firefox_info("89.0.2")),
    ));

    let report = reconciler
        .ensure(&PackageResource::new("firefox", PresenceSpec::Present), false)
        .await
        .unwrap();

    assert!(!report.changed);
    assert_eq!(report.msg, "Package firefox is already present");
    assert!(reconciler
        .provider()
        .runner()
        .calls()
        .iter()
        .all(|call| call[1] != "install"));
}

#[tokio::test]
async fn test_latest_upgrade_uses_bare_name() {
    let reconciler = Reconciler::new(client(
        ScriptedRunner::new()
            .on_success(&["cask", "info", "firefox"], &firefox_info("88.0"))
            .on_success(&["cask", "install", "firefox", "--force"], "==> Installing\n"),
    ));

    let resource =
        PackageResource::new("firefox", PresenceSpec::Latest).with_install_options(["--force"]);
    // firefox_info("88.0") advertises 88.0 itself, so no upgrade
    let report = reconciler.ensure(&resource, false).await.unwrap();
    assert_eq!(report.action, Action::None);

    let reconciler = Reconciler::new(client(
        ScriptedRunner::new()
            .on_success(
                &["cask", "info", "firefox"],
                &format!(
                    "firefox: 89.0.2 (auto_updates)\n{}/firefox/88.0 (123B)\n",
                    common::ROOT
                ),
            )
            .on_success(&["cask", "install", "firefox", "--force"], "==> Installing\n"),
    ));
    let report = reconciler.ensure(&resource, false).await.unwrap();
    assert!(report.changed);
    assert_eq!(
        report.action,
        Action::Install {
            identifier: "firefox".to_string()
        }
    );
    assert_eq!(
        reconciler
            .provider()
            .runner()
            .count(&["cask", "install", "firefox", "--force"]),
        1
    );
}

#[tokio::test]
async fn test_latest_with_comma_version_is_idempotent() {
    let reconciler = Reconciler::new(client(ScriptedRunner::new().on_success(
        &["cask", "info", "zoom"],
        &format!(
            "zoom: 5.7.1.543,5.7.1 (auto_updates)\n{}/zoom/5.7.1.543,5.7.1 (12B)\n",
            common::ROOT
        ),
    )));

    let report = reconciler
        .ensure(&PackageResource::new("zoom", PresenceSpec::Latest), false)
        .await
        .unwrap();

    assert_eq!(
        report.before,
        CurrentState::Installed {
            version: Some("5.7.1.543,5.7.1".to_string())
        }
    );
    assert_eq!(report.action, Action::None);
    assert!(!report.changed);
    assert!(reconciler
        .provider()
        .runner()
        .calls()
        .iter()
        .all(|call| call[1] != "install"));
}

#[tokio::test]
async fn test_missing_package_is_named_error() {
    let reconciler = Reconciler::new(client(
        ScriptedRunner::new()
            .on_success(&["cask", "info", "nosuch"], "Not installed\n")
            .on_success(
                &["cask", "install", "nosuch-1.0"],
                "Error: No available cask for nosuch-1.0\n",
            ),
    ));

    let resource = PackageResource::new("nosuch", PresenceSpec::Version("1.0".to_string()));
    let err = reconciler.ensure(&resource, false).await.unwrap_err();
    assert!(matches!(err, CaskError::PackageNotFound { .. }));
    assert_eq!(err.to_string(), "Could not find cask package nosuch");
}

#[tokio::test]
async fn test_apply_survives_uninstall_and_query_failures() {
    let reconciler = Reconciler::new(client(
        ScriptedRunner::new()
            .on_success(&["cask", "info", "firefox"], &firefox_info("89.0.2"))
            .on(
                &["cask", "uninstall", "firefox"],
                ExecutionOutcome::failure(1, "Error: permission denied"),
            )
            .on(
                &["cask", "info", "broken"],
                ExecutionOutcome::failure(1, "Error: brew exploded"),
            )
            .on_success(&["cask", "info", "vlc"], NOT_INSTALLED)
            .on_success(&["cask", "install", "vlc"], "==> Installing Cask vlc\n"),
    ));

    let outcomes = reconciler
        .apply(
            &[
                PackageResource::new("firefox", PresenceSpec::Absent),
                PackageResource::new("broken", PresenceSpec::Present),
                PackageResource::new("vlc", PresenceSpec::Present),
            ],
            false,
        )
        .await;

    assert_eq!(outcomes.len(), 3);

    let firefox = outcomes[0].result.as_ref().unwrap();
    assert!(!firefox.changed);
    assert_eq!(firefox.skipped.len(), 1);

    assert!(matches!(
        outcomes[1].result,
        Err(CaskError::QueryFailed { .. })
    ));

    let vlc = outcomes[2].result.as_ref().unwrap();
    assert!(vlc.changed);
}

#[tokio::test]
async fn test_check_mode_only_reads() {
    let reconciler = Reconciler::new(client(
        ScriptedRunner::new().on_success(&["cask", "info", "vlc"], NOT_INSTALLED),
    ));

    let report = reconciler
        .ensure(&PackageResource::new("vlc", PresenceSpec::Present), true)
        .await
        .unwrap();

    assert!(report.changed);
    assert_eq!(reconciler.provider().runner().calls().len(), 1);
}
