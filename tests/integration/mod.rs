/// Integration test suite: the habit tracker over real storage backends
mod persistence;
