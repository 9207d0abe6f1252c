use fixedbitset::FixedBitSet;

use crate::math::{BoundError, prime_count_hint};

/// Odd-only Eratosthenes table: bit `i` covers the odd value `2i + 1`, and a
/// set bit means composite. Storing the complement keeps the fresh bitset a
/// valid all-prime starting state. 2 never appears in the table; the
/// accessors paper over that.
pub struct OddSieve {
    composite: FixedBitSet,
    bound: u64,
}

/// Sieve the odd integers up to `bound` inclusive.
///
/// The table has `1 + bound / 2` entries; with an even bound the last entry
/// sticks one value past `bound`, and the accessors clamp accordingly. The
/// striking loop runs far enough that every entry is still correct.
pub fn odd_sieve(bound: u64) -> Result<OddSieve, BoundError> {
    let entries = usize::try_from(bound / 2 + 1).map_err(|_| BoundError::Overflow(bound))?;
    let mut composite = FixedBitSet::with_capacity(entries);
    composite.set(0, true); // 1 is not prime

    let top = (bound.isqrt() / 2) as usize;
    for i in 1..=top {
        if composite[i] {
            continue;
        }
        let v = 2 * i + 1;
        // first odd multiple worth striking is v*v, at index 2i(i+1)
        let mut j = 2 * i * (i + 1);
        while j < entries {
            composite.set(j, true);
            j += v;
        }
    }
    Ok(OddSieve { composite, bound })
}

impl OddSieve {
    pub fn bound(&self) -> u64 {
        self.bound
    }

    /// Number of table entries.
    pub fn entries(&self) -> usize {
        self.composite.len()
    }

    /// Raw table flag: whether the odd value `2 * ix + 1` is prime.
    /// Panics if `ix` is past the end of the table.
    pub fn entry(&self, ix: usize) -> bool {
        !self.composite[ix]
    }

    /// Membership query over `[0, bound]`. Anything past `bound` answers
    /// false, including the padding entry an even bound leaves behind.
    pub fn is_prime(&self, n: u64) -> bool {
        if n > self.bound || n < 2 {
            return false;
        }
        if n % 2 == 0 {
            return n == 2;
        }
        !self.composite[(n / 2) as usize]
    }

    /// Extract the ordered prime list, with 2 put back in front.
    pub fn primes(&self) -> Vec<u64> {
        let mut out = Vec::with_capacity(prime_count_hint(self.bound as f64));
        if self.bound >= 2 {
            out.push(2);
        }
        for i in 1..self.entries() {
            if !self.composite[i] {
                let v = 2 * i as u64 + 1;
                if v > self.bound {
                    break;
                }
                out.push(v);
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::primes::wheel_primes;

    fn naive_is_prime(n: u64) -> bool {
        n >= 2 && (2..).take_while(|d| d * d <= n).all(|d| n % d != 0)
    }

    #[test]
    fn table_matches_oracle() {
        for bound in [30u64, 31, 100] {
            let sieve = odd_sieve(bound).unwrap();
            assert!(!sieve.entry(0));
            for ix in 0..sieve.entries() {
                let v = 2 * ix as u64 + 1;
                assert_eq!(sieve.entry(ix), naive_is_prime(v), "bound {bound}, value {v}");
            }
        }
    }

    #[test]
    fn membership_queries() {
        let sieve = odd_sieve(30).unwrap();
        assert!(!sieve.is_prime(0));
        assert!(!sieve.is_prime(1));
        assert!(sieve.is_prime(2));
        assert!(sieve.is_prime(29));
        assert!(!sieve.is_prime(4));
        assert!(!sieve.is_prime(27));
        // outside the sieved range
        assert!(!sieve.is_prime(31));
    }

    #[test]
    fn even_bound_does_not_leak_padding() {
        // the table for 10 physically holds an entry for 11, which is prime,
        // but 11 is outside the requested range
        let sieve = odd_sieve(10).unwrap();
        assert_eq!(sieve.entries(), 6);
        assert!(sieve.entry(5));
        assert!(!sieve.is_prime(11));
        assert_eq!(sieve.primes(), vec![2, 3, 5, 7]);
    }

    #[test]
    fn small_bounds() {
        assert_eq!(odd_sieve(0).unwrap().primes(), vec![]);
        assert_eq!(odd_sieve(1).unwrap().primes(), vec![]);
        assert_eq!(odd_sieve(2).unwrap().primes(), vec![2]);
        assert_eq!(
            odd_sieve(30).unwrap().primes(),
            vec![2, 3, 5, 7, 11, 13, 17, 19, 23, 29]
        );
    }

    #[test]
    fn agrees_with_trial_division() {
        for bound in 0..=500u64 {
            let from_sieve = odd_sieve(bound).unwrap().primes();
            let from_trial = wheel_primes::<u64>(bound);
            assert_eq!(from_sieve, from_trial, "bound {bound}");
        }
    }

    #[test]
    fn pi_of_1000() {
        assert_eq!(odd_sieve(1000).unwrap().primes().len(), 168);
    }

    #[test]
    fn idempotent() {
        let a = odd_sieve(777).unwrap();
        let b = odd_sieve(777).unwrap();
        assert_eq!(a.primes(), b.primes());
        assert_eq!(a.entries(), b.entries());
    }
}
