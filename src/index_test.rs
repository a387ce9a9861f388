use arbitrary::{Arbitrary, Unstructured};
use rand::{prelude::random, rngs::SmallRng, Rng, SeedableRng};

use std::collections::BTreeMap;

use super::*;
use crate::{to_seed, Error};

#[test]
fn test_rbset() {
    let seed: u128 = random();
    // let seed: u128 = 306171699234476756746827099155462650145;
    println!("test_rbset seed:{}", seed);
    let mut rng = SmallRng::from_seed(to_seed(seed));

    // u8 keys, heavy on duplicates.
    test_with_key::<u8>("test_rbset_u8", &mut rng, 1_000, 5_000);
    // u16 keys, moderate duplication.
    test_with_key::<u16>("test_rbset_u16", &mut rng, 10_000, 5_000);
    // u64 keys, mostly unique.
    test_with_key::<u64>("test_rbset_u64", &mut rng, 20_000, 5_000);
}

fn test_with_key<K>(prefix: &str, rng: &mut SmallRng, n_init: usize, n_ops: usize)
where
    for<'a> K: Copy + Ord + Arbitrary<'a> + fmt::Debug + fmt::Display,
    rand::distributions::Standard: rand::distributions::Distribution<K>,
{
    let mut index: Index<K> = Index::new(prefix);
    let mut model: BTreeMap<K, usize> = BTreeMap::new();

    for _i in 0..n_init {
        let key: K = rng.gen();
        index.insert(key);
        *model.entry(key).or_insert(0) += 1;
    }
    println!("{} initial load len:{}", prefix, index.len());
    index.validate().unwrap();

    let mut counts = [0_usize; 7];
    for _i in 0..n_ops {
        let bytes = rng.gen::<[u8; 32]>();
        let mut uns = Unstructured::new(&bytes);

        let op: Op<K> = uns.arbitrary().unwrap();
        // println!("{} op -- {:?}", prefix, op);
        match op {
            Op::Insert(key) => {
                index.insert(key);
                *model.entry(key).or_insert(0) += 1;
                counts[0] += 1;
            }
            Op::InsertShared(key) => {
                index.insert_shared(Arc::new(key));
                *model.entry(key).or_insert(0) += 1;
                counts[1] += 1;
            }
            Op::Remove(key) => {
                remove_and_check(prefix, &mut index, &mut model, key);
                counts[2] += 1;
            }
            Op::Get(key) => {
                match (index.get(&key), model.get(&key)) {
                    (Err(Error::KeyNotFound(_, _)), None) => (),
                    (Err(err), _) => panic!("{}", err),
                    (Ok(value), Some(_)) => assert_eq!(value, &key),
                    (Ok(_), None) => panic!("{} unexpected key {}", prefix, key),
                }
                counts[3] += 1;
            }
            Op::Contains(key) => {
                assert_eq!(index.contains(&key), model.contains_key(&key));
                counts[4] += 1;
            }
            Op::WriteOp(Write::Ins { value, exclusive }) => {
                let res = index.write(Write::Ins { value, exclusive }).unwrap();
                assert!(res.is_none());
                *model.entry(value).or_insert(0) += 1;
                counts[5] += 1;
            }
            Op::WriteOp(Write::Rem { key }) => {
                remove_and_check(prefix, &mut index, &mut model, key);
                counts[5] += 1;
            }
            Op::Validate => {
                index.validate().unwrap();
                counts[6] += 1;
            }
        }
    }
    println!("{} len:{:09} counts:{:?}", prefix, index.len(), counts);

    assert_eq!(index.len(), model.values().sum::<usize>());
    compare_iter(&index, &model);

    let stats = index.validate().unwrap();
    assert_eq!(stats.n_count, index.len());
    assert_eq!(stats.n_sentinels, stats.n_count + 1);
    check_height(&stats);

    index.close().unwrap();
}

#[test]
fn test_rbset_example() {
    let mut index: Index<u32> = Index::new("example");
    for value in [10, 20, 30, 15, 25, 5].iter() {
        index.insert(*value);
    }
    assert_eq!(index.len(), 6);
    index.validate().unwrap();

    let values: Vec<u32> = index.iter().copied().collect();
    assert_eq!(values, vec![5, 10, 15, 20, 25, 30]);

    let text = index.to_string();
    assert!(text.contains("/ROOT"), "{}", text);
    assert!(text.contains("null/B"), "{}", text);

    let value = index.remove(&20).unwrap();
    assert_eq!(value, Value::Owned(20));
    assert_eq!(value.is_owned(), true);
    index.validate().unwrap();

    let values: Vec<u32> = index.iter().copied().collect();
    assert_eq!(values, vec![5, 10, 15, 25, 30]);
}

#[test]
fn test_rbset_empty() {
    let mut index: Index<u64> = Index::new("empty");
    assert_eq!(index.len(), 0);
    assert_eq!(index.is_empty(), true);
    assert_eq!(index.to_name(), "empty".to_string());

    let stats = index.to_stats();
    assert_eq!(stats.n_count, 0);
    assert_eq!(stats.n_sentinels, 1);

    match index.get(&10) {
        Err(Error::KeyNotFound(_, _)) => (),
        res => panic!("{:?}", res),
    }
    match index.remove(&10) {
        Err(Error::KeyNotFound(_, _)) => (),
        res => panic!("{:?}", res),
    }
    assert_eq!(index.contains(&10), false);
    assert_eq!(index.iter().next(), None);
    index.validate().unwrap();

    // removing the last entry leaves a single sentinel root again.
    index.insert(10);
    index.remove(&10).unwrap();
    assert_eq!(index.is_empty(), true);
    assert_eq!(index.to_stats().n_sentinels, 1);
    index.validate().unwrap();

    index.purge().unwrap();
}

#[test]
fn test_rbset_duplicates() {
    let mut index: Index<u32> = Index::new("duplicates");
    for _ in 0..5 {
        index.insert(42);
    }
    index.insert(41);
    index.insert(43);
    assert_eq!(index.len(), 7);
    index.validate().unwrap();

    let values: Vec<u32> = index.iter().copied().collect();
    assert_eq!(values, vec![41, 42, 42, 42, 42, 42, 43]);

    for i in 0..5 {
        index.remove(&42).unwrap();
        assert_eq!(index.len(), 6 - i);
        index.validate().unwrap();
    }
    match index.remove(&42) {
        Err(Error::KeyNotFound(_, _)) => (),
        res => panic!("{:?}", res),
    }
    let values: Vec<u32> = index.iter().copied().collect();
    assert_eq!(values, vec![41, 43]);
}

#[test]
fn test_rbset_shared() {
    let payload = Arc::new("shared-payload".to_string());
    let mut index: Index<String> = Index::new("shared");
    index.insert_shared(Arc::clone(&payload));
    index.insert("owned-payload".to_string());
    assert_eq!(Arc::strong_count(&payload), 2);
    index.validate().unwrap();

    assert_eq!(index.get("shared-payload").unwrap(), &*payload);

    let value = index.remove("shared-payload").unwrap();
    assert_eq!(value.is_owned(), false);
    assert_eq!(Arc::strong_count(&payload), 2);
    std::mem::drop(value);
    assert_eq!(Arc::strong_count(&payload), 1);

    let value = index.remove("owned-payload").unwrap();
    assert_eq!(value.is_owned(), true);
    assert_eq!(value.as_value().as_str(), "owned-payload");

    // dropping the index releases the reference it holds.
    let mut index: Index<String> = Index::new("shared");
    index.insert_shared(Arc::clone(&payload));
    assert_eq!(Arc::strong_count(&payload), 2);
    std::mem::drop(index);
    assert_eq!(Arc::strong_count(&payload), 1);
}

#[test]
fn test_rbset_write() {
    let mut index: Index<u64> = Index::new("write-ops");
    assert!(index.write(Write::insert(10)).unwrap().is_none());
    assert!(index.write(Write::insert_shared(20)).unwrap().is_none());
    assert!(index.write(Write::insert(10)).unwrap().is_none());
    assert_eq!(index.len(), 3);

    let value = index.write(Write::remove(20)).unwrap().unwrap();
    assert_eq!(value.is_owned(), false);
    assert_eq!(*value.as_value(), 20);

    match index.write(Write::remove(99)) {
        Err(Error::KeyNotFound(_, _)) => (),
        res => panic!("{:?}", res),
    }
    index.validate().unwrap();
}

#[test]
fn test_rbset_sequential() {
    let mut index: Index<u64> = Index::new("sequential");
    for value in 0..1024 {
        index.insert(value);
    }
    let stats = index.validate().unwrap();
    check_height(&stats);

    let text = stats.to_string();
    assert!(text.contains("rbset.name = sequential"), "{}", text);
    assert!(text.contains("n_count=1024"), "{}", text);

    for value in 0..1024 {
        assert_eq!(index.get(&value).unwrap(), &value);
    }
    for value in (0..1024).rev() {
        let got = index.remove(&value).unwrap();
        assert_eq!(*got.as_value(), value);
        if value % 128 == 0 {
            index.validate().unwrap();
        }
    }
    assert_eq!(index.is_empty(), true);
    index.validate().unwrap();
}

#[test]
fn test_rbset_churn() {
    let seed: u128 = random();
    println!("test_rbset_churn seed:{}", seed);
    let mut rng = SmallRng::from_seed(to_seed(seed));

    // small key space forces constant rebalancing through every
    // insert and remove case; audit the invariants after each step.
    let mut index: Index<u8> = Index::new("churn");
    let mut model: BTreeMap<u8, usize> = BTreeMap::new();
    for _round in 0..50 {
        for _i in 0..200 {
            let key = rng.gen::<u8>() % 16;
            if rng.gen::<bool>() {
                index.insert(key);
                *model.entry(key).or_insert(0) += 1;
            } else {
                remove_and_check("test_rbset_churn", &mut index, &mut model, key);
            }
            index.validate().unwrap();
        }
        while let Some((&key, _)) = model.iter().next() {
            remove_and_check("test_rbset_churn", &mut index, &mut model, key);
            index.validate().unwrap();
        }
        assert_eq!(index.is_empty(), true);
        assert_eq!(index.to_stats().n_sentinels, 1);
    }
}

#[test]
fn test_rbset_load() {
    let seed: u128 = random();
    println!("test_rbset_load seed:{}", seed);

    let index: Index<u64> = load_index(seed, 10_000, 1_000);
    let stats = index.validate().unwrap();
    assert_eq!(stats.n_count, index.len());
    check_height(&stats);

    let mut prev: Option<u64> = None;
    for value in index.iter() {
        if let Some(p) = prev {
            assert!(p <= *value, "{} {}", p, value);
        }
        prev = Some(*value);
    }
    index.purge().unwrap();
}

#[derive(Clone, Debug, Arbitrary)]
enum Op<K> {
    Insert(K),
    InsertShared(K),
    Remove(K),
    Get(K),
    Contains(K),
    WriteOp(Write<K>),
    Validate,
}

fn remove_and_check<K>(
    prefix: &str,
    index: &mut Index<K>,
    model: &mut BTreeMap<K, usize>,
    key: K,
) where
    K: Copy + Ord + fmt::Debug,
{
    match model.get_mut(&key) {
        Some(count) => {
            let value = index.remove(&key).unwrap();
            assert_eq!(*value.as_value(), key);
            *count -= 1;
            if *count == 0 {
                model.remove(&key);
            }
        }
        None => match index.remove(&key) {
            Err(Error::KeyNotFound(_, _)) => (),
            Err(err) => panic!("{}", err),
            Ok(value) => panic!("{} rogue entry {:?}", prefix, value),
        },
    }
}

fn compare_iter<K>(index: &Index<K>, model: &BTreeMap<K, usize>)
where
    K: Copy + Ord + fmt::Debug,
{
    let mut iter = index.iter();
    for (key, count) in model.iter() {
        for _ in 0..*count {
            assert_eq!(iter.next(), Some(key));
        }
    }
    assert_eq!(iter.next(), None);
}

// red-black balance keeps the deepest leaf within twice the height of
// a perfectly balanced tree.
fn check_height(stats: &Stats) {
    let depths = stats.depths.as_ref().unwrap();
    let bound = (2.0 * ((stats.n_count + 1) as f64).log2()) + 1.0;
    assert!(
        (depths.to_max() as f64) <= bound,
        "max depth {} n_count {}",
        depths.to_max(),
        stats.n_count
    );
}
