//! Two ways of enumerating primes up to a bound, plus the timing loop
//! that races them against each other.

pub mod bench;
pub mod math;
