use serde::{Deserialize, Serialize};
use std::fmt;

/// Declares a surrogate-key newtype over a database SERIAL column.
macro_rules! serial_id {
    ($(#[$meta:meta])* $name:ident($inner:ty), $accessor:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name($inner);

        impl $name {
            pub fn new(id: $inner) -> Self {
                Self(id)
            }

            pub fn $accessor(&self) -> $inner {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<$inner> for $name {
            fn from(id: $inner) -> Self {
                Self(id)
            }
        }

        impl From<$name> for $inner {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

serial_id!(
    /// A fire station (the top-level operational scope).
    StationId(i32),
    as_i32
);

serial_id!(
    /// A sub-station (detachment) belonging to a station.
    SubStationId(i32),
    as_i32
);

serial_id!(
    /// A controller (dispatcher) who performs actions on the board.
    ControllerId(i32),
    as_i32
);

serial_id!(VehicleId(i32), as_i32);

serial_id!(ObservationId(i32), as_i32);

serial_id!(CrewMemberId(i32), as_i32);

serial_id!(
    /// A daily or station note row.
    NoteId(i32),
    as_i32
);

serial_id!(
    /// Activity log rows use BIGSERIAL since they are append-only and high volume.
    ActivityLogId(i64),
    as_i64
);
