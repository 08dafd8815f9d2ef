use rand::Rng;

type IdentifierInnerType = u16;

/// ICMP identifier shared by every probe of one trace.
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
pub struct Identifier(pub IdentifierInnerType);

impl Identifier {
    pub fn random() -> Identifier {
        Identifier(rand::thread_rng().gen())
    }
}

impl From<IdentifierInnerType> for Identifier {
    fn from(value: IdentifierInnerType) -> Self {
        Identifier(value)
    }
}

impl From<Identifier> for IdentifierInnerType {
    fn from(value: Identifier) -> Self {
        value.0
    }
}

impl std::fmt::Display for Identifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:#06x}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fmt() {
        assert_eq!("0xabcd", format!("{}", Identifier(0xABCD)));
        assert_eq!("0x0001", format!("{}", Identifier(1)));
    }
}
