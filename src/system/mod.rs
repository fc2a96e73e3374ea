pub(crate) mod banner;
