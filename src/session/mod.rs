//! The application shell: composes the intro player and the transition
//! controller into one clock-driven session.

pub mod site_session;
