use super::Ttl;

type SequenceNumberInnerType = u16;

#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
pub struct SequenceNumber(pub SequenceNumberInnerType);

impl From<SequenceNumberInnerType> for SequenceNumber {
    fn from(value: SequenceNumberInnerType) -> Self {
        SequenceNumber(value)
    }
}

impl From<SequenceNumber> for SequenceNumberInnerType {
    fn from(value: SequenceNumber) -> Self {
        value.0
    }
}

// Probes carry their TTL as sequence number.
impl From<Ttl> for SequenceNumber {
    fn from(ttl: Ttl) -> Self {
        SequenceNumber(SequenceNumberInnerType::from(ttl.0))
    }
}
