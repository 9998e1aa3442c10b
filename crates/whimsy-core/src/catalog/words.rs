// # Built-in word lists
//
// Each list is sorted, deduplicated, lowercase ASCII, at most six letters per
// word, and disjoint from the other two lists. `Catalog::validate` checks all of
// this; the tests in `catalog` run it against these lists.

pub(crate) static PLANTS: &[&str] = &[
    "acacia", "agave", "alder", "almond", "aloe", "anise", "apple", "arnica", "ash", "aspen",
    "aster", "azalea", "bamboo", "banana", "barley", "basil", "bay", "bean", "beech", "beet",
    "birch", "borage", "box", "briar", "brome", "broom", "cactus", "calla", "canna", "carob",
    "carrot", "cassia", "catnip", "cedar", "celery", "chard", "cherry", "chia", "chive", "citron",
    "clove", "clover", "cocoa", "coffee", "corn", "cosmos", "cotton", "cress", "crocus", "cumin",
    "cycad", "dahlia", "daisy", "date", "dill", "dock", "elder", "elm", "endive", "fennel", "fern",
    "fig", "fir", "flax", "garlic", "ginger", "ginkgo", "gorse", "gourd", "grape", "guava", "hazel",
    "heath", "hebe", "hemp", "henna", "holly", "hops", "hosta", "iris", "ivy", "jute", "kale",
    "kelp", "kiwi", "kudzu", "larch", "laurel", "leek", "lemon", "lentil", "lichen", "lilac",
    "lily", "linden", "lotus", "lovage", "lupin", "maize", "mango", "maple", "marrow", "melon",
    "millet", "mimosa", "mint", "moss", "myrtle", "neem", "nettle", "nutmeg", "oak", "oat", "okra",
    "olive", "onion", "orchid", "palm", "pansy", "papaya", "pea", "peach", "pear", "pecan", "peony",
    "pepper", "phlox", "pine", "plum", "poplar", "poppy", "potato", "privet", "quince", "radish",
    "ramp", "reed", "rice", "rose", "rowan", "rue", "rush", "rye", "sage", "savory", "sedge",
    "senna", "sesame", "sisal", "sorrel", "soy", "spruce", "squash", "sumac", "tansy", "taro",
    "tea", "teak", "thyme", "tomato", "tulip", "turnip", "vetch", "vine", "violet", "walnut",
    "wasabi", "wheat", "willow", "woad", "yam", "yarrow", "yew", "yucca", "zinnia",
];

pub(crate) static ANIMALS: &[&str] = &[
    "adder", "alpaca", "anole", "ant", "ape", "asp", "auk", "baboon", "badger", "bat", "bear",
    "beaver", "bee", "beetle", "bison", "boar", "bobcat", "bongo", "booby", "bug", "bull", "camel",
    "canary", "carp", "cat", "chick", "cicada", "clam", "cobra", "cod", "condor", "coot", "cougar",
    "cow", "coyote", "crab", "crane", "crow", "cuckoo", "dassie", "deer", "dingo", "dodo", "dog",
    "donkey", "dove", "drake", "duck", "dugong", "eagle", "eel", "egret", "eland", "elk", "emu",
    "ewe", "falcon", "ferret", "finch", "fish", "flea", "fly", "fossa", "fox", "frog", "gannet",
    "gator", "gecko", "gerbil", "gibbon", "gnat", "gnu", "goat", "goose", "gopher", "grouse",
    "grub", "gull", "guppy", "hake", "hare", "hawk", "heron", "hippo", "hog", "hornet", "horse",
    "hound", "hyena", "ibex", "ibis", "iguana", "impala", "jackal", "jaguar", "jay", "kakapo",
    "kea", "koala", "kudu", "lark", "leech", "lemur", "lion", "lizard", "llama", "locust", "loon",
    "louse", "lynx", "macaw", "magpie", "mako", "mamba", "manta", "marmot", "marten", "mink",
    "minnow", "mole", "monkey", "moose", "moth", "mouse", "mule", "murre", "newt", "ocelot",
    "okapi", "orca", "oryx", "osprey", "otter", "owl", "ox", "oyster", "panda", "parrot", "peahen",
    "perch", "pigeon", "piglet", "pika", "pike", "pony", "possum", "prawn", "puffin", "puma",
    "python", "quail", "rabbit", "raven", "ray", "rhea", "rhino", "robin", "rook", "salmon", "seal",
    "shark", "sheep", "shrew", "shrimp", "skink", "skunk", "sloth", "slug", "smelt", "snail",
    "snake", "snipe", "sole", "sow", "spider", "squid", "stoat", "stork", "swan", "swift", "tahr",
    "tapir", "tern", "tetra", "tiger", "toad", "toucan", "trout", "tuna", "turkey", "turtle",
    "vole", "wasp", "weasel", "whale", "wolf", "wombat", "worm", "wren", "yak", "zebra", "zebu",
];

pub(crate) static COLORS: &[&str] = &[
    "amber", "aqua", "argent", "auburn", "azure", "beige", "bisque", "bistre", "black", "blond",
    "blue", "blush", "bone", "brass", "brick", "bronze", "brown", "buff", "cerise", "chalk",
    "cinder", "claret", "clay", "coal", "cobalt", "copper", "coral", "cream", "cyan", "denim",
    "dun", "dusk", "ebony", "ecru", "ember", "fawn", "flame", "frost", "garnet", "gilt", "gold",
    "gray", "green", "grey", "honey", "indigo", "ink", "iron", "ivory", "jade", "jasper", "jet",
    "khaki", "lapis", "lava", "lime", "linen", "maroon", "mauve", "mocha", "navy", "nickel",
    "ochre", "onyx", "opal", "orange", "oxide", "pearl", "petrol", "pewter", "pink", "prune",
    "puce", "purple", "quartz", "red", "rouge", "ruby", "ruddy", "russet", "rust", "sable", "sand",
    "sepia", "sienna", "silver", "sky", "slate", "smoke", "snow", "steel", "straw", "tan", "taupe",
    "tawny", "teal", "topaz", "umber", "white", "wine", "yellow", "zinc",
];
