pub mod bulk;
pub mod formset_state;
pub mod licences;
pub mod report;
