// ============================================================================
// Solver Phase Markers
// ============================================================================

/// Marker type indicating a solver that has been built but not yet solved.
#[derive(Debug, Clone, Copy)]
pub struct Pending;

/// Marker type indicating a solver whose matching is complete.
#[derive(Debug, Clone, Copy)]
pub struct Solved;
