mod listings_tests;
mod navigation_tests;
