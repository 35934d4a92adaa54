mod helpers;
mod test_hook;
