//! Read-only lookup helpers layered over the reference snapshot.

mod agency;
mod construction;
mod qualification;
mod region;

pub use agency::{agency_areas, AgencyResolver, ResolvedAgency, UNIFIED_SCHEME};
pub use construction::ConstructionResolver;
pub use qualification::{
    QualificationCatalog, ALL_QUALIFICATION_NAMES, SUPERVISING_ENGINEER_CERT,
    SUPERVISING_ENGINEER_TRAINING,
};
pub use region::{RegionExpander, REGION_NAMES};
