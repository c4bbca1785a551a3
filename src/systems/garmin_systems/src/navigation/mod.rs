pub mod nav_indicator;
pub mod pilot_waypoint;
