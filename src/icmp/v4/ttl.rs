type TtlInnerType = u8;

#[derive(Copy, Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Ttl(pub TtlInnerType);

impl Ttl {
    pub(crate) fn start_value() -> Ttl {
        // The first hop is reached with TTL 1.
        Ttl(1)
    }

    /// All TTL values from 1 up to and including `max`.
    pub(crate) fn up_to(max: TtlInnerType) -> impl Iterator<Item = Ttl> {
        (Self::start_value().0..=max).map(Ttl)
    }
}

impl From<TtlInnerType> for Ttl {
    fn from(integer: TtlInnerType) -> Self {
        Ttl(integer)
    }
}

impl From<Ttl> for TtlInnerType {
    fn from(ttl: Ttl) -> Self {
        ttl.0
    }
}

impl From<Ttl> for u32 {
    fn from(ttl: Ttl) -> Self {
        u32::from(ttl.0)
    }
}

impl std::fmt::Display for Ttl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fmt() {
        assert_eq!("8", format!("{}", Ttl(8)));
        assert_eq!(" 8", format!("{:2}", Ttl(8)));
    }

    #[test]
    fn up_to_starts_at_one_without_gaps() {
        let ttls: Vec<u8> = Ttl::up_to(4).map(u8::from).collect();
        assert_eq!(vec![1, 2, 3, 4], ttls);
    }

    #[test]
    fn up_to_max_value_terminates() {
        assert_eq!(255, Ttl::up_to(u8::MAX).count());
    }
}
