//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render one piece of a view from props and report user actions
//! back through callbacks; pages own the workflow state they edit.

pub mod experiment_card;
pub mod nav_bar;
pub mod notice_banner;
pub mod population_table;
pub mod variable_editor;
pub mod variable_list;
