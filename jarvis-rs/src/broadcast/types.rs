/// Aggregate outcome of one broadcast run. Individual recipients are not
/// reported.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BroadcastReport {
    pub sent: u32,
    pub failed_and_blocked: u32,
}
