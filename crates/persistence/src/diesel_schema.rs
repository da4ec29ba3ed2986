// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Diesel table definitions.
//!
//! Must stay in sync with the SQL migrations under `migrations/`.

diesel::table! {
    employers (id) {
        id -> BigInt,
        name -> Text,
        status -> Text,
        created_at -> Text,
    }
}

diesel::table! {
    profiles (id) {
        id -> BigInt,
        full_name -> Text,
        candidate_code -> Nullable<Text>,
        worker_code -> Nullable<Text>,
        current_stage -> Text,
        created_at -> Text,
        deleted_at -> Nullable<Text>,
    }
}

diesel::table! {
    projects (id) {
        id -> BigInt,
        project_code -> Text,
        employer_id -> BigInt,
        name -> Text,
        stage -> Text,
        start_date -> Nullable<Text>,
        end_date -> Nullable<Text>,
        actual_start_date -> Nullable<Text>,
        actual_end_date -> Nullable<Text>,
        completion_date -> Nullable<Text>,
        termination_date -> Nullable<Text>,
        on_hold_attribution -> Nullable<Text>,
        created_at -> Text,
        deleted_at -> Nullable<Text>,
    }
}

diesel::table! {
    assignments (id) {
        id -> BigInt,
        project_id -> BigInt,
        profile_id -> BigInt,
        stage -> Text,
        deployed_at -> Nullable<Text>,
        removed_at -> Nullable<Text>,
        removal_reason -> Nullable<Text>,
        created_at -> Text,
    }
}

diesel::table! {
    profile_stage_history (id) {
        id -> BigInt,
        profile_id -> BigInt,
        from_stage -> Nullable<Text>,
        to_stage -> Text,
        actor_id -> Text,
        actor_type -> Text,
        reason -> Nullable<Text>,
        project_id -> Nullable<BigInt>,
        transitioned_at -> Text,
    }
}

diesel::table! {
    project_stage_history (id) {
        id -> BigInt,
        project_id -> BigInt,
        from_stage -> Nullable<Text>,
        to_stage -> Text,
        actor_id -> Text,
        actor_type -> Text,
        reason -> Nullable<Text>,
        attribution -> Nullable<Text>,
        transitioned_at -> Text,
    }
}

diesel::table! {
    stage_documents (id) {
        id -> BigInt,
        history_id -> BigInt,
        title -> Text,
        file_url -> Text,
        uploaded_by -> Nullable<Text>,
    }
}

diesel::table! {
    training_batches (id) {
        id -> BigInt,
        batch_code -> Text,
        program_name -> Text,
        status -> Text,
        start_date -> Nullable<Text>,
        end_date -> Nullable<Text>,
        created_at -> Text,
    }
}

diesel::table! {
    batch_enrollments (id) {
        id -> BigInt,
        batch_id -> BigInt,
        profile_id -> BigInt,
        status -> Text,
        completion_date -> Nullable<Text>,
        created_at -> Text,
    }
}

diesel::joinable!(projects -> employers (employer_id));
diesel::joinable!(assignments -> projects (project_id));
diesel::joinable!(assignments -> profiles (profile_id));
diesel::joinable!(profile_stage_history -> profiles (profile_id));
diesel::joinable!(project_stage_history -> projects (project_id));
diesel::joinable!(stage_documents -> project_stage_history (history_id));
diesel::joinable!(batch_enrollments -> training_batches (batch_id));
diesel::joinable!(batch_enrollments -> profiles (profile_id));

diesel::allow_tables_to_appear_in_same_query!(
    employers,
    profiles,
    projects,
    assignments,
    profile_stage_history,
    project_stage_history,
    stage_documents,
    training_batches,
    batch_enrollments,
);
