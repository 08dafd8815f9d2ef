/// Internet checksum (RFC 1071) of `buf`.
///
/// Words are summed little-endian and the result is byte-swapped, so the
/// returned value is in network order: it is what goes into the checksum
/// field when that field is written big-endian. Running it over a packet
/// that already carries a correct checksum yields 0.
pub(crate) fn checksum(buf: &[u8]) -> u16 {
    let mut sum: u32 = 0;
    let mut words = buf.chunks_exact(2);
    for word in &mut words {
        sum = sum.wrapping_add(u32::from(u16::from_le_bytes([word[0], word[1]])));
    }
    if let [last] = words.remainder() {
        sum = sum.wrapping_add(u32::from(*last));
    }
    while sum >> 16 != 0 {
        sum = (sum & 0xFFFF) + (sum >> 16);
    }
    #[allow(clippy::cast_possible_truncation)] // folded into 16 bits above
    let folded = sum as u16;
    (!folded).swap_bytes()
}
