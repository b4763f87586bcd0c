// Docker log multiplexing: strip per-frame stream headers into plain text.
//
// Non-TTY containers prefix every frame with an 8-byte header:
// [stream (0 stdin, 1 stdout, 2 stderr), 0, 0, 0, len as u32 big-endian].

const HEADER_LEN: usize = 8;

fn frame_header(buf: &[u8]) -> Option<usize> {
    if buf.len() < HEADER_LEN || buf[0] > 2 || buf[1..4] != [0, 0, 0] {
        return None;
    }
    let len = u32::from_be_bytes([buf[4], buf[5], buf[6], buf[7]]) as usize;
    (buf.len() - HEADER_LEN >= len).then_some(len)
}

/// Remove multiplex framing from a raw log payload. Input that does not start
/// with a valid header is returned unchanged, which makes this a pass-through
/// for bollard's already demultiplexed output. A truncated trailing frame
/// keeps its payload bytes.
pub fn demultiplex(raw: &[u8]) -> Vec<u8> {
    if frame_header(raw).is_none() {
        return raw.to_vec();
    }
    let mut out = Vec::with_capacity(raw.len());
    let mut rest = raw;
    while !rest.is_empty() {
        match frame_header(rest) {
            Some(len) => {
                out.extend_from_slice(&rest[HEADER_LEN..HEADER_LEN + len]);
                rest = &rest[HEADER_LEN + len..];
            }
            None => {
                let start = if rest.len() >= HEADER_LEN && rest[0] <= 2 && rest[1..4] == [0, 0, 0]
                {
                    HEADER_LEN
                } else {
                    0
                };
                out.extend_from_slice(&rest[start..]);
                break;
            }
        }
    }
    out
}

/// Demultiplex, drop blank lines and join with `\n`.
pub fn clean_log_text(raw: &[u8]) -> String {
    let plain = demultiplex(raw);
    String::from_utf8_lossy(&plain)
        .lines()
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
