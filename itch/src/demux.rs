//! Ethernet/IPv4/UDP demultiplexing of captured frames.

const ETHERTYPE_IPV4: u16 = 0x0800;
const IPPROTO_UDP: u8 = 17;
const MAC_HEADER_LEN: usize = 12;
const UDP_HEADER_LEN: usize = 8;

/// Frames with a shim stack deeper than this are given up on.
const MAX_SHIM_DEPTH: usize = 4;

/// Why a frame produced no UDP payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameSkip {
    /// Header parsing ran past the end of the captured bytes.
    Truncated,
    /// No IPv4/UDP carriage was found within the permitted shim depth.
    NotUdp,
}

/// Extracts the UDP payload from a raw Ethernet frame.
///
/// Skips the 12 MAC address bytes, steps over up to [`MAX_SHIM_DEPTH`]
/// 4-byte shims (802.1Q tags and the like) until the EtherType reads IPv4,
/// then walks the IPv4 header by its IHL and the fixed-size UDP header. The
/// returned slice length comes from the UDP length field, not the capture
/// length.
pub fn udp_payload(frame: &[u8]) -> Result<&[u8], FrameSkip> {
    let mut pos = MAC_HEADER_LEN;

    let mut shims = 0;
    loop {
        if pos + 2 > frame.len() {
            return Err(FrameSkip::Truncated);
        }
        let ethertype = u16::from_be_bytes([frame[pos], frame[pos + 1]]);
        if ethertype == ETHERTYPE_IPV4 {
            pos += 2;
            break;
        }
        if shims == MAX_SHIM_DEPTH {
            return Err(FrameSkip::NotUdp);
        }
        shims += 1;
        pos += 4;
    }

    if pos + 20 > frame.len() {
        return Err(FrameSkip::Truncated);
    }
    let header_len = usize::from(frame[pos] & 0x0F) * 4;
    let protocol = frame[pos + 9];
    if pos + header_len > frame.len() {
        return Err(FrameSkip::Truncated);
    }
    if protocol != IPPROTO_UDP {
        return Err(FrameSkip::NotUdp);
    }
    pos += header_len;

    if pos + UDP_HEADER_LEN > frame.len() {
        return Err(FrameSkip::Truncated);
    }
    let udp_len = usize::from(u16::from_be_bytes([frame[pos + 4], frame[pos + 5]]));
    if udp_len < UDP_HEADER_LEN {
        return Err(FrameSkip::Truncated);
    }
    let payload_len = udp_len - UDP_HEADER_LEN;
    pos += UDP_HEADER_LEN;

    if pos + payload_len > frame.len() {
        return Err(FrameSkip::Truncated);
    }
    Ok(&frame[pos..pos + payload_len])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(shims: &[[u8; 4]], protocol: u8, payload: &[u8]) -> Vec<u8> {
        let mut out = vec![0u8; MAC_HEADER_LEN];
        for shim in shims {
            out.extend_from_slice(shim);
        }
        out.extend_from_slice(&ETHERTYPE_IPV4.to_be_bytes());
        // Minimal 20-byte IPv4 header.
        let mut ip = [0u8; 20];
        ip[0] = 0x45;
        ip[9] = protocol;
        out.extend_from_slice(&ip);
        // UDP header with the length field covering header + payload.
        let udp_len = (UDP_HEADER_LEN + payload.len()) as u16;
        out.extend_from_slice(&[0, 0, 0, 0]);
        out.extend_from_slice(&udp_len.to_be_bytes());
        out.extend_from_slice(&[0, 0]);
        out.extend_from_slice(payload);
        out
    }

    #[test]
    fn test_plain_ipv4_udp() {
        let data = frame(&[], IPPROTO_UDP, b"payload");
        assert_eq!(udp_payload(&data).unwrap(), b"payload");
    }

    #[test]
    fn test_single_vlan_shim() {
        let data = frame(&[[0x81, 0x00, 0x00, 0x64]], IPPROTO_UDP, b"tagged");
        assert_eq!(udp_payload(&data).unwrap(), b"tagged");
    }

    #[test]
    fn test_shim_depth_capped() {
        // Nothing but shim-looking bytes: must give up, not loop.
        let mut data = vec![0u8; MAC_HEADER_LEN];
        data.extend_from_slice(&[0x81, 0x00].repeat(32));
        assert_eq!(udp_payload(&data), Err(FrameSkip::NotUdp));
    }

    #[test]
    fn test_non_udp_protocol() {
        let data = frame(&[], 6, b"tcp");
        assert_eq!(udp_payload(&data), Err(FrameSkip::NotUdp));
    }

    #[test]
    fn test_truncated_frame() {
        let data = frame(&[], IPPROTO_UDP, b"payload");
        assert_eq!(udp_payload(&data[..data.len() - 4]), Err(FrameSkip::Truncated));
    }

    #[test]
    fn test_udp_length_authoritative() {
        // Capture longer than the datagram: payload is cut to the UDP length.
        let mut data = frame(&[], IPPROTO_UDP, b"abc");
        data.extend_from_slice(b"trailing-capture-bytes");
        assert_eq!(udp_payload(&data).unwrap(), b"abc");
    }

    #[test]
    fn test_ihl_respected() {
        // IPv4 header with two words of options (IHL = 7).
        let mut data = vec![0u8; MAC_HEADER_LEN];
        data.extend_from_slice(&ETHERTYPE_IPV4.to_be_bytes());
        let mut ip = [0u8; 28];
        ip[0] = 0x47;
        ip[9] = IPPROTO_UDP;
        data.extend_from_slice(&ip);
        data.extend_from_slice(&[0, 0, 0, 0]);
        data.extend_from_slice(&(UDP_HEADER_LEN as u16 + 2).to_be_bytes());
        data.extend_from_slice(&[0, 0]);
        data.extend_from_slice(b"ok");
        assert_eq!(udp_payload(&data).unwrap(), b"ok");
    }
}
