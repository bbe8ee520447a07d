mod property_growth;
mod scenarios;
