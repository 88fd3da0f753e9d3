mod agency_data;
pub(crate) use agency_data::AgencyData;
