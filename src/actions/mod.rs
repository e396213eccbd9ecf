pub mod issue_actions;
