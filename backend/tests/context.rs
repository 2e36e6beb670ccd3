mod common;

use backend::{BackendError, ContextAttributes, GraphicsContext, Profile, WindowConfig};
use common::{MockPlatform, Script};

// ============================================================================
// Lifecycle
// ============================================================================

#[test]
fn test_create_then_destroy_is_balanced() {
    let (platform, journal) = MockPlatform::new(Script::default());
    let ctx = GraphicsContext::with_platform(platform, WindowConfig::default()).expect("context");
    ctx.destroy();

    let journal = journal.borrow();
    assert_eq!(journal.windows_created, 1);
    assert_eq!(journal.windows_destroyed, 1);
    assert_eq!(journal.contexts_created, 1);
    assert_eq!(journal.contexts_destroyed, 1);
    assert_eq!(journal.shutdowns, 1);
    assert_eq!(
        journal.calls,
        vec![
            "init",
            "create_window",
            "create_context",
            "resolve",
            "negotiated",
            "destroy_context",
            "destroy_window",
            "shutdown",
        ]
    );
}

#[test]
fn test_drop_tears_down_like_destroy() {
    let (platform, journal) = MockPlatform::new(Script::default());
    {
        let _ctx = GraphicsContext::with_platform(platform, WindowConfig::default()).expect("context");
    }
    let journal = journal.borrow();
    assert_eq!(journal.contexts_destroyed, 1);
    assert_eq!(journal.windows_destroyed, 1);
    assert_eq!(journal.shutdowns, 1);
}

#[test]
fn test_window_failure_shuts_down() {
    let (platform, journal) = MockPlatform::new(Script {
        fail_window: true,
        ..Script::default()
    });
    let result = GraphicsContext::with_platform(platform, WindowConfig::default());
    assert!(matches!(result, Err(BackendError::WindowCreation(_))));

    let journal = journal.borrow();
    assert_eq!(journal.windows_created, 0);
    assert_eq!(journal.contexts_created, 0);
    assert_eq!(journal.shutdowns, 1);
}

#[test]
fn test_context_failure_releases_window() {
    let (platform, journal) = MockPlatform::new(Script {
        fail_context: true,
        ..Script::default()
    });
    let result = GraphicsContext::with_platform(platform, WindowConfig::default());
    assert!(matches!(result, Err(BackendError::ContextCreation(_))));

    let journal = journal.borrow();
    assert_eq!(journal.windows_created, journal.windows_destroyed);
    assert_eq!(journal.contexts_created, 0);
    assert_eq!(journal.shutdowns, 1);
}

#[test]
fn test_resolution_failure_releases_everything() {
    let (platform, journal) = MockPlatform::new(Script {
        fail_resolve: true,
        ..Script::default()
    });
    let result = GraphicsContext::with_platform(platform, WindowConfig::default());
    assert!(matches!(result, Err(BackendError::ExtensionResolution(_))));

    let journal = journal.borrow();
    assert!(!journal.calls.contains(&"negotiated"));
    assert_eq!(journal.contexts_created, journal.contexts_destroyed);
    assert_eq!(journal.windows_created, journal.windows_destroyed);
    assert_eq!(
        &journal.calls[journal.calls.len() - 3..],
        ["destroy_context", "destroy_window", "shutdown"]
    );
}

#[test]
fn test_invalid_config_never_opens_a_window() {
    let (platform, journal) = MockPlatform::new(Script::default());
    let config = WindowConfig {
        width: 0,
        ..WindowConfig::default()
    };
    let result = GraphicsContext::with_platform(platform, config);
    assert!(matches!(result, Err(BackendError::Init(_))));
    assert_eq!(journal.borrow().calls, vec!["init", "shutdown"]);
}

// ============================================================================
// Negotiation
// ============================================================================

#[test]
fn test_requested_attributes_round_trip() {
    let (platform, journal) = MockPlatform::new(Script::default());
    let ctx = GraphicsContext::with_platform(platform, WindowConfig::default()).expect("context");

    let expected = ContextAttributes {
        gl_major: 3,
        gl_minor: 2,
        profile: Profile::Core,
        stencil_bits: 8,
    };
    assert_eq!(journal.borrow().requested, Some(expected));
    assert_eq!(ctx.attributes(), expected);
}

#[test]
fn test_downgraded_context_is_rejected() {
    let (platform, journal) = MockPlatform::new(Script {
        negotiated: Some(ContextAttributes {
            gl_major: 2,
            gl_minor: 1,
            profile: Profile::Compatibility,
            stencil_bits: 8,
        }),
        ..Script::default()
    });
    let result = GraphicsContext::with_platform(platform, WindowConfig::default());
    assert!(matches!(result, Err(BackendError::ContextCreation(_))));

    // the driver is asked only after its entry points were resolved
    let journal = journal.borrow();
    assert_eq!(
        journal.calls,
        vec![
            "init",
            "create_window",
            "create_context",
            "resolve",
            "negotiated",
            "destroy_context",
            "destroy_window",
            "shutdown",
        ]
    );
    assert_eq!(journal.contexts_created, journal.contexts_destroyed);
    assert_eq!(journal.shutdowns, 1);
}

#[test]
fn test_missing_stencil_is_rejected() {
    let (platform, _journal) = MockPlatform::new(Script {
        negotiated: Some(ContextAttributes {
            stencil_bits: 0,
            ..WindowConfig::default().attributes()
        }),
        ..Script::default()
    });
    let result = GraphicsContext::with_platform(platform, WindowConfig::default());
    assert!(matches!(result, Err(BackendError::ContextCreation(_))));
}

#[test]
fn test_newer_version_same_profile_is_accepted() {
    let newer = ContextAttributes {
        gl_major: 4,
        gl_minor: 1,
        ..WindowConfig::default().attributes()
    };
    let (platform, _journal) = MockPlatform::new(Script {
        negotiated: Some(newer),
        ..Script::default()
    });
    let ctx = GraphicsContext::with_platform(platform, WindowConfig::default()).expect("context");
    assert_eq!(ctx.attributes(), newer);
}
