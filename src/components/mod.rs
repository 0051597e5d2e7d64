pub mod itinerary;
