pub(crate) mod apng;
