//! Built-in flow tables — the onboarding tour and the user-info intake.
//!
//! Step order is the pagination order. Onboarding collects nothing
//! mandatory and can always be skipped; it persists only its flag.
//! User-info enforces its required fields and persists the answers.

use super::definition::{
    FieldDefinition, FieldOption, Flow, FlowDefinition, StepDefinition,
};

/// The first-launch onboarding tour.
pub fn onboarding() -> FlowDefinition {
    FlowDefinition {
        flow: Flow::Onboarding,
        skippable: true,
        persists_data: false,
        completion_route: "/home".to_string(),
        steps: vec![
            StepDefinition::new("welcome", "onboarding.welcome.title")
                .with_description("onboarding.welcome.description")
                .with_emoji("👋"),
            StepDefinition::new("source", "onboarding.source.title")
                .with_description("onboarding.source.description")
                .with_fields(vec![FieldDefinition::radio(
                    "referral_source",
                    "onboarding.source.label",
                    vec![
                        FieldOption::new("friend", "onboarding.source.options.friend"),
                        FieldOption::new("social", "onboarding.source.options.social"),
                        FieldOption::new("search", "onboarding.source.options.search"),
                        FieldOption::new("other", "onboarding.source.options.other"),
                    ],
                )]),
            StepDefinition::new("goals", "onboarding.goals.title")
                .with_emoji("🎯")
                .with_fields(vec![
                    FieldDefinition::checkbox(
                        "goals",
                        "onboarding.goals.label",
                        vec![
                            FieldOption::new("track", "onboarding.goals.options.track"),
                            FieldOption::new("learn", "onboarding.goals.options.learn"),
                            FieldOption::new("connect", "onboarding.goals.options.connect"),
                            FieldOption::new("explore", "onboarding.goals.options.explore"),
                        ],
                    )
                    .with_multiple(),
                ]),
        ],
    }
}

/// The profile intake shown after sign-up.
pub fn user_info() -> FlowDefinition {
    FlowDefinition {
        flow: Flow::UserInfo,
        skippable: false,
        persists_data: true,
        completion_route: "/home".to_string(),
        steps: vec![
            StepDefinition::new("profile", "user_info.profile.title")
                .with_description("user_info.profile.description")
                .with_fields(vec![
                    FieldDefinition::text("name", "user_info.profile.name.label")
                        .with_placeholder("user_info.profile.name.placeholder")
                        .required(),
                    FieldDefinition::date("birth_date", "user_info.profile.birth_date.label"),
                ]),
            StepDefinition::new("background", "user_info.background.title").with_fields(vec![
                FieldDefinition::select(
                    "country",
                    "user_info.background.country.label",
                    vec![
                        FieldOption::new("us", "user_info.background.country.options.us"),
                        FieldOption::new("gb", "user_info.background.country.options.gb"),
                        FieldOption::new("de", "user_info.background.country.options.de"),
                        FieldOption::new("fr", "user_info.background.country.options.fr"),
                        FieldOption::new("other", "user_info.background.country.options.other"),
                    ],
                ),
                FieldDefinition::radio(
                    "gender",
                    "user_info.background.gender.label",
                    vec![
                        FieldOption::new("female", "user_info.background.gender.options.female"),
                        FieldOption::new("male", "user_info.background.gender.options.male"),
                        FieldOption::new(
                            "non_binary",
                            "user_info.background.gender.options.non_binary",
                        ),
                        FieldOption::new(
                            "prefer_not_to_say",
                            "user_info.background.gender.options.prefer_not_to_say",
                        ),
                    ],
                ),
            ]),
            StepDefinition::new("preferences", "user_info.preferences.title").with_fields(vec![
                FieldDefinition::checkbox(
                    "interests",
                    "user_info.preferences.interests.label",
                    vec![
                        FieldOption::new("fitness", "user_info.preferences.interests.options.fitness"),
                        FieldOption::new(
                            "nutrition",
                            "user_info.preferences.interests.options.nutrition",
                        ),
                        FieldOption::new("sleep", "user_info.preferences.interests.options.sleep"),
                        FieldOption::new(
                            "mindfulness",
                            "user_info.preferences.interests.options.mindfulness",
                        ),
                    ],
                )
                .with_multiple()
                .required(),
                // Single-select modeled on the multi-select widget: the
                // stored value is a list of length zero or one.
                FieldDefinition::checkbox(
                    "contact_channel",
                    "user_info.preferences.contact_channel.label",
                    vec![
                        FieldOption::new(
                            "email",
                            "user_info.preferences.contact_channel.options.email",
                        ),
                        FieldOption::new(
                            "push",
                            "user_info.preferences.contact_channel.options.push",
                        ),
                        FieldOption::new(
                            "sms",
                            "user_info.preferences.contact_channel.options.sms",
                        ),
                    ],
                ),
            ]),
        ],
    }
}
