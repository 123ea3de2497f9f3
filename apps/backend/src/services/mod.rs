pub mod trial_flow;
pub mod trials;

#[cfg(test)]
mod tests_trial_flow;
