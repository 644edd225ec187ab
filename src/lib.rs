pub mod certificate;
pub mod excluded_middle;
pub mod kernel;
pub mod peano;
pub mod proof;
pub mod proof_step;

#[cfg(test)]
mod tests;
