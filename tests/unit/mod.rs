//! Unit test modules.

mod exercise_scenarios_test;
mod joint_selection_test;
