/// Unit test suite for the habit store core
mod store_properties;
mod legacy_snapshots;
