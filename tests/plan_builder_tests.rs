//! Plan-builder structural properties: which steps a plan contains, and in
//! what order, as a function of repository metadata and options.

mod common;

use common::{content_types, primary_proxy};
use proptest::prelude::*;
use pubflow::models::{EnvironmentId, Repository, RepositoryId};
use pubflow::orchestration::{PlanBuilder, PlanOptions, PlanStepKind};

#[test]
fn skip_publication_content_types_never_get_publication_steps() {
    let builder = PlanBuilder::new(content_types());
    let repo = Repository::new(RepositoryId(1), "registry", "docker")
        .with_environment(EnvironmentId(1));

    // regardless of options
    for options in [
        PlanOptions::default(),
        PlanOptions::default().with_source_repository(RepositoryId(9)),
        PlanOptions::default().with_contents_changed(false),
    ] {
        let plan = builder.build(&repo, &primary_proxy(), options);
        assert_eq!(plan.publication_step_count(), 0);
    }
}

#[test]
fn source_repository_yields_exactly_one_reuse_step_and_no_publish() {
    let builder = PlanBuilder::new(content_types());
    let repo = Repository::new(RepositoryId(2), "zoo-copy", "yum");
    let options = PlanOptions::default().with_source_repository(RepositoryId(1));

    let plan = builder.build(&repo, &primary_proxy(), options);

    assert_eq!(plan.publication_step_count(), 1);
    assert!(plan.has_step("reuse_publication"));
    assert!(!plan.has_step("publish"));
}

#[test]
fn guard_step_tracks_protection_flag() {
    let builder = PlanBuilder::new(content_types());

    let protected = Repository::new(RepositoryId(3), "zoo", "yum");
    let plan = builder.build(&protected, &primary_proxy(), PlanOptions::default());
    assert_eq!(
        plan.steps
            .iter()
            .filter(|s| s.kind == PlanStepKind::RefreshAccessGuard)
            .count(),
        1
    );

    let unprotected = Repository::new(RepositoryId(4), "zoo", "yum").unprotected(true);
    let plan = builder.build(&unprotected, &primary_proxy(), PlanOptions::default());
    assert!(!plan.has_step("refresh_access_guard"));
}

#[test]
fn distribution_step_is_present_iff_environment_bound_and_always_last() {
    let builder = PlanBuilder::new(content_types());

    let unbound = Repository::new(RepositoryId(5), "zoo", "yum");
    let plan = builder.build(&unbound, &primary_proxy(), PlanOptions::default());
    assert!(!plan.has_step("refresh_distribution"));

    let bound = Repository::new(RepositoryId(6), "zoo", "yum")
        .with_environment(EnvironmentId(1));
    let plan = builder.build(&bound, &primary_proxy(), PlanOptions::default());
    assert!(plan.has_step("refresh_distribution"));
    assert_eq!(plan.steps.last().unwrap().kind.name(), "refresh_distribution");
}

proptest! {
    /// Structural invariants hold for every combination of repository
    /// metadata and options the builder can see.
    #[test]
    fn built_plans_respect_structural_invariants(
        skip_publication in any::<bool>(),
        unprotected in any::<bool>(),
        has_environment in any::<bool>(),
        has_source in any::<bool>(),
        contents_changed in proptest::option::of(any::<bool>()),
    ) {
        let content_type = if skip_publication { "docker" } else { "yum" };
        let mut repo = Repository::new(RepositoryId(10), "repo", content_type)
            .unprotected(unprotected);
        if has_environment {
            repo = repo.with_environment(EnvironmentId(1));
        }

        let mut options = PlanOptions::default();
        if has_source {
            options = options.with_source_repository(RepositoryId(1));
        }
        if let Some(flag) = contents_changed {
            options = options.with_contents_changed(flag);
        }

        let plan = PlanBuilder::new(content_types())
            .build(&repo, &primary_proxy(), options);

        // publish and reuse are mutually exclusive, at most one of either
        prop_assert!(plan.publication_step_count() <= 1);
        prop_assert!(!(plan.has_step("publish") && plan.has_step("reuse_publication")));

        if skip_publication {
            prop_assert_eq!(plan.publication_step_count(), 0);
        } else if has_source {
            prop_assert!(plan.has_step("reuse_publication"));
        } else {
            prop_assert!(plan.has_step("publish"));
        }

        prop_assert_eq!(plan.has_step("refresh_access_guard"), !unprotected);
        prop_assert_eq!(plan.has_step("refresh_distribution"), has_environment);

        // fixed total order: publication first, distribution last
        if plan.publication_step_count() == 1 {
            prop_assert!(plan.steps[0].kind.is_publication());
        }
        if has_environment {
            let last = &plan.steps.last().unwrap().kind;
            let expected = PlanStepKind::RefreshDistribution {
                contents_changed: contents_changed.unwrap_or(true),
            };
            prop_assert_eq!(last, &expected);
        }
    }
}
