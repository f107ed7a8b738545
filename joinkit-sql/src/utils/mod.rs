pub mod record_hashtable_key;
